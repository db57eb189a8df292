//! Handlers for the analytics event log: `POST /api/log` and the admin
//! `GET /api/analytics` report.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lessonsite_db::models::event::{CreateEvent, DailyEventCount, EventTypeCount};
use lessonsite_db::models::progress::LessonCompletionCount;
use lessonsite_db::repositories::{EventRepo, ProgressRepo};
use lessonsite_db::DbPool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::middleware::origin::RequestOrigin;
use crate::query::{ExportFormat, FormatParams};
use crate::response::StatusResponse;
use crate::state::AppState;

/// Trailing window for the per-type event counts.
pub const EVENT_COUNT_WINDOW_DAYS: i64 = 7;

/// Trailing window for the per-day activity counts.
pub const DAILY_ACTIVITY_WINDOW_DAYS: i64 = 30;

/// File name of the CSV analytics export.
pub const ANALYTICS_EXPORT_FILENAME: &str = "analytics_export.csv";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/log`.
#[derive(Debug, Deserialize)]
pub struct LogEventRequest {
    pub event_type: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    /// Free-form payload, stored as serialized JSON.
    pub metadata: Option<Value>,
}

/// The admin analytics report. Sections appear in this order in both the
/// JSON and CSV renderings.
#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    /// Event counts by type over the last 7 days.
    pub event_counts: Vec<EventTypeCount>,
    /// Events per UTC day over the last 30 days, newest first.
    pub daily_activity: Vec<DailyEventCount>,
    /// Completed-lesson counts across all users.
    pub progress_stats: Vec<LessonCompletionCount>,
}

impl AnalyticsReport {
    /// Run the three aggregate queries.
    pub async fn load(pool: &DbPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            event_counts: EventRepo::counts_by_type(pool, EVENT_COUNT_WINDOW_DAYS).await?,
            daily_activity: EventRepo::daily_counts(pool, DAILY_ACTIVITY_WINDOW_DAYS).await?,
            progress_stats: ProgressRepo::completed_counts_by_lesson(pool).await?,
        })
    }

    /// Render as CSV: three header-led sections separated by a blank line.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let sections = [
            csv_section(
                ["Event Type", "Count (Last 7 Days)"],
                self.event_counts
                    .iter()
                    .map(|c| [c.event_type.clone(), c.count.to_string()]),
            )?,
            csv_section(
                ["Date", "Event Count"],
                self.daily_activity
                    .iter()
                    .map(|c| [c.date.clone(), c.count.to_string()]),
            )?,
            csv_section(
                ["Lesson ID", "Completed Count"],
                self.progress_stats
                    .iter()
                    .map(|c| [c.lesson_id.clone(), c.completed_count.to_string()]),
            )?,
        ];
        Ok(sections.join(&b"\r\n"[..]))
    }
}

fn csv_section(
    header: [&str; 2],
    rows: impl Iterator<Item = [String; 2]>,
) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// A CSV attachment response.
pub fn csv_attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/log
///
/// Record one analytics event. Only `event_type` is required.
pub async fn log_event(
    State(state): State<AppState>,
    origin: RequestOrigin,
    payload: Result<Json<LogEventRequest>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let event_type = input
        .event_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("event_type is required".into()))?;

    let event = CreateEvent {
        event_type,
        session_id: input.session_id,
        user_id: input.user_id,
        metadata: input.metadata,
        ip_address: origin.address_opt(),
        user_agent: origin.user_agent,
    };
    let id = EventRepo::insert(&state.pool, &event).await?;

    tracing::debug!(event_id = id, event_type = %event.event_type, "Recorded event");
    Ok(Json(StatusResponse::success()))
}

/// GET /api/analytics?token=&format=csv|json
///
/// Admin-only aggregate report.
pub async fn analytics_report(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    let report = AnalyticsReport::load(&state.pool).await?;
    let format = params.export_format();
    tracing::info!(admin = admin.id(), ?format, "Analytics report requested");

    match format {
        ExportFormat::Json => Ok(Json(report).into_response()),
        ExportFormat::Csv => {
            let body = report
                .to_csv()
                .map_err(|e| AppError::InternalError(format!("analytics CSV export: {e}")))?;
            Ok(csv_attachment(ANALYTICS_EXPORT_FILENAME, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_sections_are_ordered_and_separated() {
        let report = AnalyticsReport {
            event_counts: vec![EventTypeCount {
                event_type: "page_view".into(),
                count: 3,
            }],
            daily_activity: vec![DailyEventCount {
                date: "2025-01-02".into(),
                count: 3,
            }],
            progress_stats: vec![],
        };
        let text = String::from_utf8(report.to_csv().unwrap()).unwrap();
        assert_eq!(
            text,
            "Event Type,Count (Last 7 Days)\r\npage_view,3\r\n\
             \r\n\
             Date,Event Count\r\n2025-01-02,3\r\n\
             \r\n\
             Lesson ID,Completed Count\r\n"
        );
    }

    #[test]
    fn csv_quotes_awkward_event_types() {
        let report = AnalyticsReport {
            event_counts: vec![EventTypeCount {
                event_type: "click,cta".into(),
                count: 1,
            }],
            daily_activity: vec![],
            progress_stats: vec![],
        };
        let text = String::from_utf8(report.to_csv().unwrap()).unwrap();
        assert!(text.contains("\"click,cta\",1\r\n"));
    }
}
