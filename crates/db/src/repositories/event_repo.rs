//! Repository for the `events` table.

use lessonsite_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::event::{CreateEvent, DailyEventCount, Event, EventTypeCount};

/// Column list for `events` queries.
const EVENT_COLUMNS: &str =
    "id, event_type, timestamp, session_id, user_id, metadata, ip_address, user_agent";

/// `datetime('now', ?)` modifier selecting the start of a trailing window.
fn window_modifier(window_days: i64) -> String {
    format!("-{window_days} days")
}

/// Append-only access to the analytics event log.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event row, returning the generated ID.
    pub async fn insert(pool: &SqlitePool, input: &CreateEvent) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events \
                (event_type, session_id, user_id, metadata, ip_address, user_agent) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING id",
        )
        .bind(&input.event_type)
        .bind(&input.session_id)
        .bind(&input.user_id)
        .bind(input.metadata_text())
        .bind(&input.ip_address)
        .bind(&input.user_agent)
        .fetch_one(pool)
        .await
    }

    /// Count events per type over the trailing `window_days`, most frequent first.
    pub async fn counts_by_type(
        pool: &SqlitePool,
        window_days: i64,
    ) -> Result<Vec<EventTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, EventTypeCount>(
            "SELECT event_type, COUNT(*) AS count \
             FROM events \
             WHERE timestamp >= datetime('now', ?1) \
             GROUP BY event_type \
             ORDER BY count DESC, event_type ASC",
        )
        .bind(window_modifier(window_days))
        .fetch_all(pool)
        .await
    }

    /// Count events per UTC calendar date over the trailing `window_days`,
    /// newest date first. Dates without events are omitted.
    pub async fn daily_counts(
        pool: &SqlitePool,
        window_days: i64,
    ) -> Result<Vec<DailyEventCount>, sqlx::Error> {
        sqlx::query_as::<_, DailyEventCount>(
            "SELECT DATE(timestamp) AS date, COUNT(*) AS count \
             FROM events \
             WHERE timestamp >= datetime('now', ?1) \
             GROUP BY DATE(timestamp) \
             ORDER BY date DESC",
        )
        .bind(window_modifier(window_days))
        .fetch_all(pool)
        .await
    }

    /// List the most recent events, newest first.
    pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id DESC LIMIT ?1");
        sqlx::query_as::<_, Event>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
