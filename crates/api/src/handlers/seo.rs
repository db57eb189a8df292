//! Crawler files: `/robots.txt` and `/sitemap.xml`.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use lessonsite_core::seo;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(&state.config.site_url),
    )
}

/// GET /sitemap.xml
///
/// Static pages plus every guide in the index.
pub async fn sitemap_xml(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let guides = state.content.guides().await?;
    let slugs = guides
        .iter()
        .filter_map(|g| g.get("slug").and_then(Value::as_str));
    let body = seo::sitemap_xml(&state.config.site_url, slugs);
    Ok(([(header::CONTENT_TYPE, "application/xml")], body))
}
