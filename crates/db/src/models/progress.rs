//! Lesson progress models.

use lessonsite_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// User id recorded when a progress update does not name one.
pub const ANONYMOUS_USER: &str = "anonymous";

/// A row from the `progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Progress {
    pub id: DbId,
    pub user_id: String,
    pub lesson_id: String,
    pub completed: bool,
    /// Seconds spent on the lesson, as last reported.
    pub time_spent: i64,
    /// Time of the last write.
    pub timestamp: Timestamp,
}

/// Upsert DTO. Every field replaces the stored value on conflict.
#[derive(Debug, Clone)]
pub struct UpsertProgress {
    pub user_id: String,
    pub lesson_id: String,
    pub completed: bool,
    pub time_spent: i64,
}

/// `(lesson_id, completed_count)` across all users.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LessonCompletionCount {
    pub lesson_id: String,
    pub completed_count: i64,
}
