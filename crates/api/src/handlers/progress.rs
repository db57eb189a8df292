//! Handlers for lesson progress: `POST /api/progress` and `GET /api/progress`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use lessonsite_db::models::progress::{Progress, UpsertProgress, ANONYMOUS_USER};
use lessonsite_db::repositories::ProgressRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, StatusResponse};
use crate::state::AppState;

/// Request body for `POST /api/progress`.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub user_id: Option<String>,
    pub lesson_id: Option<String>,
    /// Defaults to `false` when absent or null.
    pub completed: Option<bool>,
    /// Seconds; defaults to 0 when absent or null.
    pub time_spent: Option<i64>,
}

/// Query parameters for `GET /api/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub user_id: Option<String>,
}

/// Absent, null and blank user ids all record against the anonymous user.
fn user_or_anonymous(user_id: Option<String>) -> String {
    user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string())
}

/// POST /api/progress
///
/// Upsert one (user, lesson) record. A repeated write replaces `completed`
/// and `time_spent`.
pub async fn update_progress(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let lesson_id = input
        .lesson_id
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("lesson_id is required".into()))?;
    let time_spent = input.time_spent.unwrap_or(0);
    if time_spent < 0 {
        return Err(AppError::BadRequest("time_spent must not be negative".into()));
    }

    let record = ProgressRepo::upsert(
        &state.pool,
        &UpsertProgress {
            user_id: user_or_anonymous(input.user_id),
            lesson_id,
            completed: input.completed.unwrap_or(false),
            time_spent,
        },
    )
    .await?;

    tracing::debug!(
        user_id = %record.user_id,
        lesson_id = %record.lesson_id,
        completed = record.completed,
        "Progress updated"
    );
    Ok(Json(StatusResponse::success()))
}

/// GET /api/progress?user_id=
///
/// All progress records for one user (`anonymous` when omitted).
pub async fn list_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressQuery>,
) -> AppResult<Json<DataResponse<Vec<Progress>>>> {
    let user_id = user_or_anonymous(params.user_id);
    let records = ProgressRepo::list_for_user(&state.pool, &user_id).await?;
    Ok(Json(DataResponse { data: records }))
}
