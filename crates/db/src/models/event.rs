//! Analytics event models.

use lessonsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub event_type: String,
    pub timestamp: Timestamp,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    /// JSON-serialized metadata as stored.
    pub metadata: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Insert DTO for an event. `timestamp` is assigned by the database.
#[derive(Debug, Clone, Default)]
pub struct CreateEvent {
    pub event_type: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub metadata: Option<Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl CreateEvent {
    /// Metadata as it is persisted: serialized JSON, or `None` when the
    /// payload is absent, `null`, or an empty object/array.
    pub fn metadata_text(&self) -> Option<String> {
        match &self.metadata {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(value) => Some(value.to_string()),
        }
    }
}

/// `(event_type, count)` over a trailing window.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: i64,
}

/// `(date, count)` for one UTC calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DailyEventCount {
    pub date: String,
    pub count: i64,
}
