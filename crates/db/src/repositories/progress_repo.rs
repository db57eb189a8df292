//! Repository for the `progress` table.

use sqlx::SqlitePool;

use crate::models::progress::{LessonCompletionCount, Progress, UpsertProgress};

/// Column list for `progress` queries.
const PROGRESS_COLUMNS: &str = "id, user_id, lesson_id, completed, time_spent, timestamp";

/// Provides the upsert and read operations for lesson progress.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert or overwrite the record for `(user_id, lesson_id)`.
    ///
    /// On conflict every field is replaced and the timestamp refreshed;
    /// `time_spent` is not accumulated. The row id is kept stable.
    pub async fn upsert(pool: &SqlitePool, input: &UpsertProgress) -> Result<Progress, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress (user_id, lesson_id, completed, time_spent, timestamp) \
             VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP) \
             ON CONFLICT (user_id, lesson_id) DO UPDATE SET \
                completed = excluded.completed, \
                time_spent = excluded.time_spent, \
                timestamp = CURRENT_TIMESTAMP \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(&input.user_id)
            .bind(&input.lesson_id)
            .bind(input.completed)
            .bind(input.time_spent)
            .fetch_one(pool)
            .await
    }

    /// Find the record for one `(user_id, lesson_id)` pair.
    pub async fn find(
        pool: &SqlitePool,
        user_id: &str,
        lesson_id: &str,
    ) -> Result<Option<Progress>, sqlx::Error> {
        let query =
            format!("SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = ?1 AND lesson_id = ?2");
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await
    }

    /// List every lesson record for a user, ordered by lesson id.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: &str,
    ) -> Result<Vec<Progress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = ?1 ORDER BY lesson_id"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count completed records per lesson, most completed first.
    pub async fn completed_counts_by_lesson(
        pool: &SqlitePool,
    ) -> Result<Vec<LessonCompletionCount>, sqlx::Error> {
        sqlx::query_as::<_, LessonCompletionCount>(
            "SELECT lesson_id, COUNT(*) AS completed_count \
             FROM progress \
             WHERE completed = 1 \
             GROUP BY lesson_id \
             ORDER BY completed_count DESC, lesson_id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
