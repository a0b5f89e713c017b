// Record sources: where events and reference names come from

use std::path::{Path, PathBuf};

use rosterlink_recon::config::InputConfig;
use rosterlink_recon::model::ReconInput;

use crate::csv::{load_events, load_reference, read_file_as_utf8};
use crate::error::IoError;

/// Produces fully materialized events and reference names.
pub trait RecordSource {
    fn fetch(&self) -> Result<ReconInput, IoError>;
}

/// Reads events and reference names from two local CSV files.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub events: PathBuf,
    pub reference: PathBuf,
    pub blob_column: String,
    pub name_column: String,
}

impl CsvSource {
    /// Resolve file paths relative to `base_dir` (usually the config's directory).
    pub fn from_config(config: &InputConfig, base_dir: &Path) -> Self {
        Self {
            events: base_dir.join(&config.events),
            reference: base_dir.join(&config.reference),
            blob_column: config.blob_column.clone(),
            name_column: config.name_column.clone(),
        }
    }
}

impl RecordSource for CsvSource {
    fn fetch(&self) -> Result<ReconInput, IoError> {
        let events_name = self.events.display().to_string();
        let events = load_events(
            &events_name,
            &read_file_as_utf8(&self.events)?,
            &self.blob_column,
        )?;

        let reference_name = self.reference.display().to_string();
        let reference = load_reference(
            &reference_name,
            &read_file_as_utf8(&self.reference)?,
            &self.name_column,
        )?;

        Ok(ReconInput { events, reference })
    }
}
