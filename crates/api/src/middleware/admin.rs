//! The admin access policy and the extractors that enforce it.
//!
//! Every admin credential goes through [`admin_principal`]. The two
//! extractors differ only in how a denial is presented: JSON endpoints get a
//! 401, browser views are redirected to the login page.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use axum::response::Redirect;
use lessonsite_core::error::CoreError;
use serde::Deserialize;

use super::cookies::cookie_value;
use crate::auth::credentials::{AdminPrincipal, CredentialKind};
use crate::auth::session::{validate_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Path of the admin login view.
pub const LOGIN_PATH: &str = "/admin/login";

/// Message returned when an admin JSON endpoint is called without access.
pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin access required";

#[derive(Debug, Default, Deserialize)]
struct TokenParams {
    token: Option<String>,
}

/// Resolve the admin principal for a request, if it carries a valid
/// credential: a signed session cookie or a matching `?token=`.
pub fn admin_principal(headers: &HeaderMap, uri: &Uri, state: &AppState) -> Option<AdminPrincipal> {
    if let Some(token) = cookie_value(headers, SESSION_COOKIE) {
        match validate_session_token(token, &state.config.session) {
            Ok(_) => {
                return Some(AdminPrincipal {
                    credential: CredentialKind::Session,
                })
            }
            Err(e) => tracing::debug!(error = %e, "Rejected admin session cookie"),
        }
    }

    let presented = Query::<TokenParams>::try_from_uri(uri)
        .ok()
        .and_then(|Query(params)| params.token)?;
    if state.config.admin.token_matches(&presented) {
        return Some(AdminPrincipal {
            credential: CredentialKind::Token,
        });
    }
    tracing::warn!(path = %uri.path(), "Rejected admin token");
    None
}

/// Requires admin access on a JSON endpoint. Rejects with 401 otherwise,
/// before the handler touches any store.
///
/// ```ignore
/// async fn export(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub AdminPrincipal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_principal(&parts.headers, &parts.uri, state)
            .map(RequireAdmin)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(ADMIN_REQUIRED_MESSAGE.into())))
    }
}

/// Requires admin access on an admin view. Redirects to the login page
/// (303) otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AdminView(pub AdminPrincipal);

impl FromRequestParts<AppState> for AdminView {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_principal(&parts.headers, &parts.uri, state)
            .map(AdminView)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
