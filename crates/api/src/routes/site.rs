//! Route definitions for the public site.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{leads, pages, seo};
use crate::state::AppState;

/// Public pages, form endpoints and crawler files.
///
/// ```text
/// GET  /                -> index
/// GET  /contact         -> contact
/// GET  /guides          -> guides_list
/// GET  /guides/{slug}   -> guide_detail
/// GET  /services        -> 303 /#features
/// GET  /topics          -> 303 /#topics
/// GET  /pricing         -> 303 /#pricing
/// GET  /faq             -> 303 /#faq
/// GET  /testimonials    -> 303 /#testimonials
/// POST /book            -> book
/// POST /seminar         -> seminar
/// GET  /robots.txt      -> robots_txt
/// GET  /sitemap.xml     -> sitemap_xml
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/contact", get(pages::contact))
        .route("/guides", get(pages::guides_list))
        .route("/guides/{slug}", get(pages::guide_detail))
        .route("/services", get(pages::services))
        .route("/topics", get(pages::topics))
        .route("/pricing", get(pages::pricing))
        .route("/faq", get(pages::faq))
        .route("/testimonials", get(pages::testimonials))
        .route("/book", post(leads::book))
        .route("/seminar", post(leads::seminar))
        .route("/robots.txt", get(seo::robots_txt))
        .route("/sitemap.xml", get(seo::sitemap_xml))
}
