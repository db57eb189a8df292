//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use lessonsite_api::error::AppError;
use lessonsite_core::error::CoreError;
use lessonsite_db::csv_store::CsvStoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Guide",
        key: "first-steps".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Guide 'first-steps' not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Missing required fields".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("event_type is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "event_type is required");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Admin access required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let cases = [
        AppError::InternalError("secret detail".into()),
        AppError::Core(CoreError::Internal("secret detail".into())),
        AppError::Database(sqlx::Error::RowNotFound),
        AppError::Store(CsvStoreError::Io(std::io::Error::other("secret detail"))),
    ];

    for err in cases {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn constraint_violations_are_internal_errors(pool: sqlx::SqlitePool) {
    let insert = "INSERT INTO progress (user_id, lesson_id) VALUES ('u1', 'l1')";
    sqlx::query(insert).execute(&pool).await.unwrap();
    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));

    let (status, json) = error_to_response(AppError::Database(err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[test]
fn store_errors_convert_into_app_error() {
    let err: AppError = CsvStoreError::Io(std::io::Error::other("disk full")).into();
    assert_matches!(err, AppError::Store(CsvStoreError::Io(_)));

    let err: AppError = CoreError::Validation("x".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}
