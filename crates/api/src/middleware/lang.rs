//! Site language resolution and the `lang` cookie.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query, Request};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Uri};
use axum::middleware::Next;
use axum::response::Response;
use lessonsite_core::lang::{Lang, LANG_COOKIE, LANG_COOKIE_MAX_AGE_SECS};
use serde::Deserialize;

use super::cookies::cookie_value;

#[derive(Debug, Default, Deserialize)]
struct LangParams {
    lang: Option<String>,
}

/// A valid `?lang=` value in the request URI, if any.
fn query_lang(uri: &Uri) -> Option<Lang> {
    Query::<LangParams>::try_from_uri(uri)
        .ok()
        .and_then(|Query(params)| params.lang)
        .and_then(|code| Lang::parse(&code))
}

/// The language for this request: `?lang=`, then the `lang` cookie, then English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteLang(pub Lang);

impl<S: Send + Sync> FromRequestParts<S> for SiteLang {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = query_lang(&parts.uri)
            .or_else(|| cookie_value(&parts.headers, LANG_COOKIE).and_then(Lang::parse))
            .unwrap_or_default();
        Ok(SiteLang(lang))
    }
}

/// Remember an explicit, valid `?lang=` choice in the `lang` cookie.
///
/// Applied to every response so any page can switch language.
pub async fn persist_lang_cookie(request: Request, next: Next) -> Response {
    let chosen = query_lang(request.uri());
    let mut response = next.run(request).await;

    if let Some(lang) = chosen {
        let cookie = format!(
            "{LANG_COOKIE}={}; Path=/; Max-Age={LANG_COOKIE_MAX_AGE_SECS}",
            lang.code()
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}
