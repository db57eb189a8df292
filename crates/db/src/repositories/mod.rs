//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod event_repo;
pub mod progress_repo;

pub use event_repo::EventRepo;
pub use progress_repo::ProgressRepo;
