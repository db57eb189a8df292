//! Shared helpers for API integration tests.
//!
//! [`build_test_app`] wires the production router ([`build_app_router`])
//! to a per-test SQLite pool and a temporary directory holding fixture
//! content and the CSV stores.

#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use lessonsite_api::auth::credentials::AdminCredentials;
use lessonsite_api::auth::password::hash_password;
use lessonsite_api::auth::session::SessionConfig;
use lessonsite_api::config::{Environment, ServerConfig, SitePaths};
use lessonsite_api::router::build_app_router;
use lessonsite_api::state::AppState;

pub const TEST_SITE_URL: &str = "https://lessons.example.org";
pub const TEST_ORIGIN: &str = "http://localhost:5173";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery";
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A router plus the temporary directory backing it. Keep the value alive
/// for the whole test; dropping it deletes the directory.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn leads_csv(&self) -> std::path::PathBuf {
        self.state.config.paths.leads_csv()
    }

    pub fn seminars_csv(&self) -> std::path::PathBuf {
        self.state.config.paths.seminars_csv()
    }
}

/// Build a test `ServerConfig` rooted at `root`.
pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        site_url: format!("{TEST_SITE_URL}/"),
        paths: SitePaths {
            data_dir: root.join("data"),
            guides_dir: root.join("guides"),
            static_dir: root.join("static"),
            instance_dir: root.join("instance"),
            database_path: root.join("instance/analytics.db"),
        },
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            token: ADMIN_TOKEN.to_string(),
        },
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
            ttl_hours: 1,
            secure_cookie: false,
        },
    }
}

fn write_json(path: &Path, value: Value) {
    std::fs::write(path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
}

/// Fixture content: both languages for topics, English-only pricing and
/// FAQs, no testimonials, and three indexed guides of which one has no
/// Markdown file.
fn write_fixture_content(root: &Path) {
    let data = root.join("data");
    let guides = root.join("guides");
    let static_dir = root.join("static");
    for dir in [&data, &guides, &static_dir] {
        std::fs::create_dir_all(dir).unwrap();
    }

    write_json(&data.join("i18n_en.json"), json!({"nav_home": "Home", "cta_book": "Book a lesson"}));
    write_json(&data.join("i18n_hi.json"), json!({"nav_home": "होम", "cta_book": "पाठ बुक करें"}));
    write_json(&data.join("topics.json"), json!([{"title": "Topic A"}, {"title": "Topic B"}]));
    write_json(&data.join("topics_hi.json"), json!([{"title": "विषय A"}, {"title": "विषय B"}]));
    write_json(&data.join("pricing.json"), json!([{"plan": "Starter", "price": "499"}]));
    write_json(&data.join("faqs.json"), json!([{"q": "Online?", "a": "Yes"}]));
    write_json(
        &data.join("guides.json"),
        json!([
            {"slug": "first-steps", "title": "First steps", "date": "2025-01-10"},
            {"slug": "advanced-tips", "title": "Advanced tips", "date": "2025-03-02"},
            {"slug": "unwritten", "title": "Coming soon", "date": "2025-02-01"}
        ]),
    );

    std::fs::write(
        guides.join("first-steps.md"),
        "# First steps\n\n| Day | Task |\n|-----|------|\n| 1 | Setup |\n\n~~old~~ new\n",
    )
    .unwrap();
    std::fs::write(guides.join("advanced-tips.md"), "Some *tips*.\n").unwrap();
    std::fs::write(static_dir.join("site.css"), "body { margin: 0; }\n").unwrap();
}

/// Build the full application router over `pool` with fixture content.
pub fn build_test_app(pool: SqlitePool) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_content(dir.path());
    let state = AppState::new(pool, test_config(dir.path()));
    let router = build_app_router(state.clone());
    TestApp { router, state, dir }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: &TestApp, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: &TestApp, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// `name=value` of the first `Set-Cookie` header for cookie `name`.
pub fn set_cookie<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{name}=")))
}

/// Log in through the form and return the `admin_session=...` cookie pair.
pub async fn login_cookie(app: &TestApp) -> String {
    let body = format!("username={ADMIN_USERNAME}&password=correct+horse+battery");
    let response = post_form(app, "/admin/login", &body).await;
    let header = set_cookie(&response, "admin_session").expect("login must set a session cookie");
    header.split(';').next().unwrap().to_string()
}
