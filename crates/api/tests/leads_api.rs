//! HTTP-level integration tests for the contact and seminar forms.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, post_form, send};
use lessonsite_core::lead::{Lead, SeminarRequest};
use serde_json::json;
use sqlx::SqlitePool;

fn read_rows<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Vec<T> {
    csv::Reader::from_path(path)
        .unwrap()
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_appends_one_row_after_header(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_form(&app, "/book", "name=Jane&phone=555-1234&email=&topic=Topic+A&message=").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let text = std::fs::read_to_string(app.leads_csv()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "timestamp,name,phone,email,topic,message,ip");

    let rows: Vec<Lead> = read_rows(&app.leads_csv());
    assert_eq!(rows[0].name, "Jane");
    assert_eq!(rows[0].topic, "Topic A");
    assert_eq!(rows[0].email, "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_trims_fields_and_records_forwarded_origin(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/book")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", "198.51.100.4")
        .body(Body::from("name=++Ravi++&phone=98765&topic=Topic+B&message=Hi%2C+there"))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows: Vec<Lead> = read_rows(&app.leads_csv());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ravi");
    assert_eq!(rows[0].message, "Hi, there");
    assert_eq!(rows[0].ip, "198.51.100.4");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_with_missing_fields_writes_nothing(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    for body in ["name=&phone=555&topic=A", "name=Jane&phone=+&topic=A", "name=Jane&phone=555"] {
        let response = post_form(&app, "/book", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            body_json(response).await,
            json!({"ok": false, "error": "Missing required fields"})
        );
    }
    assert!(!app.leads_csv().exists());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_bookings_are_kept(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    for _ in 0..2 {
        post_form(&app, "/book", "name=Jane&phone=555&topic=A").await;
    }

    let rows: Vec<Lead> = read_rows(&app.leads_csv());
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seminar_enquiry_is_stored(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_form(
        &app,
        "/seminar",
        "org=City+School&contact=Mrs+Rao&phone=555&attendees=40&preferred_date=2025-05-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let rows: Vec<SeminarRequest> = read_rows(&app.seminars_csv());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].org, "City School");
    assert_eq!(rows[0].attendees, "40");
    assert!(!app.leads_csv().exists(), "seminars never land in leads.csv");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seminar_without_contact_is_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_form(&app, "/seminar", "org=City+School&phone=555").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["ok"], false);
    assert!(!app.seminars_csv().exists());
}
