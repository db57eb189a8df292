//! Admin area: login/logout, dashboard and analytics views, lead export.
//!
//! Views use [`AdminView`] (redirect to login when denied); the lead export
//! is a data endpoint and uses [`RequireAdmin`] (401 when denied).

use axum::extract::{OriginalUri, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use lessonsite_core::error::CoreError;
use lessonsite_core::lead::Lead;
use lessonsite_db::models::event::{Event, EventTypeCount};
use lessonsite_db::repositories::EventRepo;
use serde::{Deserialize, Serialize};

use super::analytics::{csv_attachment, AnalyticsReport, EVENT_COUNT_WINDOW_DAYS};
use super::pages::PageMeta;
use crate::auth::session::{clear_session_cookie, issue_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::admin::{admin_principal, AdminView, RequireAdmin, LOGIN_PATH};
use crate::middleware::lang::SiteLang;
use crate::query::{ExportFormat, FormatParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Number of events listed on the dashboard.
const RECENT_EVENTS_LIMIT: i64 = 20;

const LEADS_FILENAME: &str = "leads.csv";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Form body for `POST /admin/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    /// The visitor already holds a valid admin credential.
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub lead_count: usize,
    /// Event counts by type over the last 7 days.
    pub event_counts: Vec<EventTypeCount>,
    pub recent_events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub report: AnalyticsReport,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// GET /admin/login
pub async fn login_page(
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<LoginPage>>> {
    let page = LoginPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        authenticated: admin_principal(&headers, &uri, &state).is_some(),
    };
    Ok(Json(DataResponse { data: page }))
}

/// POST /admin/login
///
/// Verify the admin username and password, then set the session cookie and
/// redirect to the dashboard. The failure message never says which half was
/// wrong.
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    let valid = state
        .config
        .admin
        .verify_login(&input.username, &input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let token = issue_session_token(&state.config.session)
        .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;
    tracing::info!("Admin logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&token, &state.config.session))],
        Redirect::to(DASHBOARD_PATH),
    )
        .into_response())
}

/// GET /admin/logout
pub async fn logout(AdminView(admin): AdminView, State(state): State<AppState>) -> Response {
    tracing::info!(credential = ?admin.credential, "Admin logged out");
    (
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// GET /admin/dashboard
pub async fn dashboard(
    AdminView(_admin): AdminView,
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<DashboardPage>>> {
    let leads: Vec<Lead> = state.leads.read_all().await?;
    let page = DashboardPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        lead_count: leads.len(),
        event_counts: EventRepo::counts_by_type(&state.pool, EVENT_COUNT_WINDOW_DAYS).await?,
        recent_events: EventRepo::list_recent(&state.pool, RECENT_EVENTS_LIMIT).await?,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /admin/analytics
pub async fn analytics_view(
    AdminView(_admin): AdminView,
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<AnalyticsPage>>> {
    let page = AnalyticsPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        report: AnalyticsReport::load(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// GET /admin/leads?token=&format=csv|json
///
/// Every captured lead, oldest first, or the raw `leads.csv` file.
pub async fn leads(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    let format = params.export_format();
    tracing::info!(admin = admin.id(), ?format, "Lead export requested");

    match format {
        ExportFormat::Json => {
            let rows: Vec<Lead> = state.leads.read_all().await?;
            Ok(Json(DataResponse { data: rows }).into_response())
        }
        ExportFormat::Csv => {
            let body = state.leads.read_raw().await?;
            Ok(csv_attachment(LEADS_FILENAME, body))
        }
    }
}
