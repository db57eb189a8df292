use std::sync::Arc;

use lessonsite_core::content::ContentStore;
use lessonsite_core::lead::{LEAD_HEADER, SEMINAR_HEADER};
use lessonsite_db::csv_store::CsvStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// SQLite pool for the event log and progress tables.
    pub pool: lessonsite_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Read-only site content.
    pub content: ContentStore,
    /// Append-only `leads.csv`.
    pub leads: Arc<CsvStore>,
    /// Append-only `seminars.csv`.
    pub seminars: Arc<CsvStore>,
}

impl AppState {
    /// Wire up state from a pool and configuration.
    pub fn new(pool: lessonsite_db::DbPool, config: ServerConfig) -> Self {
        let paths = &config.paths;
        let content = ContentStore::new(paths.data_dir.clone(), paths.guides_dir.clone());
        let leads = Arc::new(CsvStore::new(paths.leads_csv(), &LEAD_HEADER));
        let seminars = Arc::new(CsvStore::new(paths.seminars_csv(), &SEMINAR_HEADER));
        Self {
            pool,
            config: Arc::new(config),
            content,
            leads,
            seminars,
        }
    }
}
