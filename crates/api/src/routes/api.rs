//! Route definitions for the `/api` JSON endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, progress};
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /log         -> log_event
/// POST /progress    -> update_progress
/// GET  /progress    -> list_progress
/// GET  /analytics   -> analytics_report (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/log", post(analytics::log_event))
        .route(
            "/progress",
            post(progress::update_progress).get(progress::list_progress),
        )
        .route("/analytics", get(analytics::analytics_report))
}
