//! Site page view models.
//!
//! Each page returns the data its template renders, wrapped in the
//! `{"data": ...}` envelope. Every view carries [`PageMeta`]: the resolved
//! language, the translation table and the canonical URL.

use axum::extract::{OriginalUri, Path, State};
use axum::response::Redirect;
use axum::Json;
use lessonsite_core::content::{RenderedGuide, FAQS, PRICING, TESTIMONIALS, TOPICS};
use lessonsite_core::lang::Lang;
use lessonsite_core::seo;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::lang::SiteLang;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fields shared by every page.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub lang: Lang,
    /// Translation table for `lang`.
    pub t: Value,
    pub site_url: String,
    pub canonical_url: String,
}

impl PageMeta {
    pub async fn load(state: &AppState, lang: Lang, path: &str) -> AppResult<Self> {
        let site_url = &state.config.site_url;
        Ok(Self {
            lang,
            t: state.content.translations(lang).await?,
            site_url: seo::base_url(site_url).to_string(),
            canonical_url: seo::canonical_url(site_url, path),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub topics: Value,
    pub pricing: Value,
    pub faqs: Value,
    pub testimonials: Value,
}

#[derive(Debug, Serialize)]
pub struct ContactPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    /// Always the English topic list, so stored lead topics stay stable.
    pub topics: Value,
}

#[derive(Debug, Serialize)]
pub struct GuidesPage {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub guides: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct GuidePage {
    #[serde(flatten)]
    pub meta: PageMeta,
    #[serde(flatten)]
    pub guide: RenderedGuide,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<IndexPage>>> {
    let content = &state.content;
    let page = IndexPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        topics: content.document(TOPICS, lang).await?,
        pricing: content.document(PRICING, lang).await?,
        faqs: content.document(FAQS, lang).await?,
        testimonials: content.document(TESTIMONIALS, lang).await?,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /contact
pub async fn contact(
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<ContactPage>>> {
    let page = ContactPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        topics: state.content.document(TOPICS, Lang::En).await?,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /guides
///
/// Guides from the index, newest first.
pub async fn guides_list(
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<GuidesPage>>> {
    let page = GuidesPage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        guides: state.content.guides().await?,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /guides/{slug}
///
/// 404 when the slug is not indexed or its Markdown file is missing.
pub async fn guide_detail(
    State(state): State<AppState>,
    SiteLang(lang): SiteLang,
    Path(slug): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<GuidePage>>> {
    let guide = state.content.guide(&slug).await?;
    let page = GuidePage {
        meta: PageMeta::load(&state, lang, uri.path()).await?,
        guide,
    };
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Legacy section URLs
// ---------------------------------------------------------------------------

pub async fn services() -> Redirect {
    Redirect::to("/#features")
}

pub async fn topics() -> Redirect {
    Redirect::to("/#topics")
}

pub async fn pricing() -> Redirect {
    Redirect::to("/#pricing")
}

pub async fn faq() -> Redirect {
    Redirect::to("/#faq")
}

pub async fn testimonials() -> Redirect {
    Redirect::to("/#testimonials")
}
