//! Read-only site content loaded from disk on every request.
//!
//! Content lives in two directories:
//!
//! - `data/` -- JSON documents. Bilingual documents come in pairs
//!   (`topics.json` / `topics_hi.json`); translations are `i18n_<lang>.json`;
//!   the guide index is `guides.json`.
//! - `guides/` -- one Markdown file per guide, named `<slug>.md`.
//!
//! Nothing is cached, so edits show up on the next request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::lang::Lang;

/// Bilingual documents served on the landing page.
pub const TOPICS: &str = "topics";
pub const PRICING: &str = "pricing";
pub const FAQS: &str = "faqs";
pub const TESTIMONIALS: &str = "testimonials";

const GUIDE_INDEX: &str = "guides.json";

/// A guide with its Markdown body rendered to HTML.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedGuide {
    /// The guide's entry from `guides.json` (title, slug, date, ...).
    pub guide: Value,
    pub content_html: String,
}

/// Filesystem-backed loader for site content.
#[derive(Debug, Clone)]
pub struct ContentStore {
    data_dir: PathBuf,
    guides_dir: PathBuf,
}

impl ContentStore {
    pub fn new(data_dir: impl Into<PathBuf>, guides_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            guides_dir: guides_dir.into(),
        }
    }

    /// Load a bilingual document (`<name>.json` or `<name>_hi.json`).
    ///
    /// A missing file yields an empty list.
    pub async fn document(&self, name: &str, lang: Lang) -> Result<Value, CoreError> {
        let file = match lang {
            Lang::Hi => format!("{name}_hi.json"),
            Lang::En => format!("{name}.json"),
        };
        Ok(read_json(&self.data_dir.join(file))
            .await?
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Load the translation table for `lang`, falling back to English.
    pub async fn translations(&self, lang: Lang) -> Result<Value, CoreError> {
        let preferred = self.data_dir.join(format!("i18n_{}.json", lang.code()));
        if let Some(table) = read_json(&preferred).await? {
            return Ok(table);
        }
        let fallback = self.data_dir.join("i18n_en.json");
        read_json(&fallback).await?.ok_or_else(|| {
            CoreError::Internal(format!(
                "translation table missing: {}",
                fallback.display()
            ))
        })
    }

    /// List guides from the index, newest `date` first.
    pub async fn guides(&self) -> Result<Vec<Value>, CoreError> {
        let Some(index) = read_json(&self.data_dir.join(GUIDE_INDEX)).await? else {
            return Ok(Vec::new());
        };
        let mut guides = match index {
            Value::Array(items) => items,
            _ => {
                return Err(CoreError::Internal(format!(
                    "{GUIDE_INDEX} must contain a JSON array"
                )))
            }
        };
        guides.sort_by(|a, b| guide_date(b).cmp(guide_date(a)));
        Ok(guides)
    }

    /// Load one guide by slug and render its Markdown.
    ///
    /// Fails with `NotFound` when the slug is not in the index or its
    /// Markdown file is missing.
    pub async fn guide(&self, slug: &str) -> Result<RenderedGuide, CoreError> {
        let not_found = || CoreError::NotFound {
            entity: "Guide",
            key: slug.to_string(),
        };
        if !is_safe_slug(slug) {
            return Err(not_found());
        }

        let guide = self
            .guides()
            .await?
            .into_iter()
            .find(|g| g.get("slug").and_then(Value::as_str) == Some(slug))
            .ok_or_else(not_found)?;

        let path = self.guides_dir.join(format!("{slug}.md"));
        let markdown = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        Ok(RenderedGuide {
            guide,
            content_html: render_markdown(&markdown),
        })
    }
}

/// Render Markdown to HTML with tables, footnotes and strikethrough enabled.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Slugs name files inside `guides/`, so only a plain file stem is allowed.
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn guide_date(guide: &Value) -> &str {
    guide.get("date").and_then(Value::as_str).unwrap_or("")
}

/// Read and parse a JSON file; `Ok(None)` when it does not exist.
async fn read_json(path: &Path) -> Result<Option<Value>, CoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CoreError::Internal(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Malformed content document");
        CoreError::Internal(format!("invalid JSON in {}: {e}", path.display()))
    })
}
