//! Domain types, validation and read-only content loading for the site.
//!
//! This crate has no database or HTTP dependencies so it can be shared by
//! the persistence layer and the API server.

pub mod content;
pub mod error;
pub mod lang;
pub mod lead;
pub mod seo;
pub mod types;
