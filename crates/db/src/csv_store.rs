//! Append-only CSV files for form submissions.
//!
//! Each store owns one file and a fixed header. The header is written when
//! the first record lands in a new (or empty) file. Appends within the
//! process are serialized by a mutex so concurrent submissions never
//! interleave partial rows; each record is written and flushed as a unit.
//! Records end in CRLF.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum CsvStoreError {
    #[error("CSV store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A header-first, append-only CSV file.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    header: &'static [&'static str],
    write_lock: Mutex<()>,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            header,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new.
    pub async fn append<T>(&self, record: T) -> Result<(), CsvStoreError>
    where
        T: Serialize + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let header = self.header;
        tokio::task::spawn_blocking(move || append_blocking(&path, header, &record)).await??;
        tracing::debug!(path = %self.path.display(), "Appended CSV record");
        Ok(())
    }

    /// Read every data row. A store that has never been written is empty.
    pub async fn read_all<T>(&self) -> Result<Vec<T>, CsvStoreError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_blocking(&path)).await?
    }

    /// Raw file contents, or just the header line if nothing was written yet.
    pub async fn read_raw(&self) -> Result<Vec<u8>, CsvStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut writer = csv::WriterBuilder::new()
                    .terminator(csv::Terminator::CRLF)
                    .from_writer(Vec::new());
                writer.write_record(self.header)?;
                writer
                    .into_inner()
                    .map_err(|e| CsvStoreError::Io(e.into_error()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn append_blocking<T: Serialize>(
    path: &Path,
    header: &[&str],
    record: &T,
) -> Result<(), CsvStoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_new = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);
    if is_new {
        writer.write_record(header)?;
    }
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn read_blocking<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CsvStoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}
