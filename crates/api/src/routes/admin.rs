//! Route definitions for the `/admin` area.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /login       -> login_page
/// POST /login       -> login
/// GET  /logout      -> logout (admin view)
/// GET  /dashboard   -> dashboard (admin view)
/// GET  /analytics   -> analytics_view (admin view)
/// GET  /leads       -> leads (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/logout", get(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .route("/analytics", get(admin::analytics_view))
        .route("/leads", get(admin::leads))
}
