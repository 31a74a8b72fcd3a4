//! CSV export of harvested records.
//!
//! Files are named `<prefix>_<engine>_<YYYYmmdd_HHMMSS>.csv` inside the
//! output directory. The header row is always written, so an empty run still
//! produces a valid table.

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::models::SearchResultRecord;

/// Timestamp format used in export file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors that can occur while writing an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes records to timestamped CSV files
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    prefix: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.output_dir.clone(), config.prefix.clone())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for an export made now
    pub fn file_name(&self, engine_tag: &str) -> String {
        format!(
            "{}_{}_{}.csv",
            self.prefix,
            engine_tag,
            Local::now().format(TIMESTAMP_FORMAT)
        )
    }

    /// Write all records and return the path of the new file
    pub fn export(&self, records: &[SearchResultRecord], engine_tag: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(self.file_name(engine_tag));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(SearchResultRecord::FIELD_NAMES)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        tracing::info!("Saved {} records to '{}'", records.len(), path.display());
        Ok(path)
    }
}
