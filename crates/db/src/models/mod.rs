//! Row structs and insert DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the table row
//! - A DTO for writes
//! - `FromRow` structs for the aggregate queries over that table

pub mod event;
pub mod progress;
