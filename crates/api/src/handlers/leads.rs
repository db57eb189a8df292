//! Public form endpoints: `POST /book` and `POST /seminar`.
//!
//! Both reply with `{"ok": true}` or `{"ok": false, "error": ...}` because
//! the site's form script reads those fields directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use chrono::Utc;
use lessonsite_core::error::CoreError;
use lessonsite_core::lead::{Lead, LeadForm, SeminarForm, SeminarRequest};

use crate::error::AppResult;
use crate::middleware::origin::RequestOrigin;
use crate::response::OkResponse;
use crate::state::AppState;

/// Turn a form validation failure into the `{"ok": false}` body; any other
/// error propagates as a regular [`AppError`](crate::error::AppError).
fn rejected(err: CoreError) -> AppResult<Response> {
    match err {
        CoreError::Validation(message) => {
            Ok((StatusCode::BAD_REQUEST, Json(OkResponse::failed(message))).into_response())
        }
        other => Err(other.into()),
    }
}

/// POST /book
///
/// Validate a contact form and append it to `leads.csv`.
pub async fn book(
    State(state): State<AppState>,
    origin: RequestOrigin,
    Form(form): Form<LeadForm>,
) -> AppResult<Response> {
    let lead = match Lead::from_form(form, &origin.address, Utc::now()) {
        Ok(lead) => lead,
        Err(err) => return rejected(err),
    };
    let topic = lead.topic.clone();

    state.leads.append(lead).await?;

    tracing::info!(topic = %topic, "Lead captured");
    Ok(Json(OkResponse::ok()).into_response())
}

/// POST /seminar
///
/// Validate a seminar enquiry and append it to `seminars.csv`.
pub async fn seminar(
    State(state): State<AppState>,
    origin: RequestOrigin,
    Form(form): Form<SeminarForm>,
) -> AppResult<Response> {
    let request = match SeminarRequest::from_form(form, &origin.address, Utc::now()) {
        Ok(request) => request,
        Err(err) => return rejected(err),
    };
    let org = request.org.clone();

    state.seminars.append(request).await?;

    tracing::info!(org = %org, "Seminar enquiry captured");
    Ok(Json(OkResponse::ok()).into_response())
}
