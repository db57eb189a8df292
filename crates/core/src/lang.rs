//! Site language selection.
//!
//! The site ships two languages. Requests pick one through the `?lang=`
//! query parameter, falling back to the `lang` cookie and finally English.

use serde::Serialize;

/// Name of the cookie that remembers the visitor's language choice.
pub const LANG_COOKIE: &str = "lang";

/// Lifetime of the language cookie in seconds (one year).
pub const LANG_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// A supported site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Hi,
}

impl Lang {
    /// Parse a language code. Only exact `en` / `hi` codes are accepted.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Resolve the request language: query parameter first, then cookie.
    pub fn resolve(query: Option<&str>, cookie: Option<&str>) -> Self {
        query
            .and_then(Self::parse)
            .or_else(|| cookie.and_then(Self::parse))
            .unwrap_or_default()
    }
}
