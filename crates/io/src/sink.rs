// Result sinks: where the filtered output goes

use std::path::{Path, PathBuf};

use rosterlink_recon::config::OutputConfig;
use rosterlink_recon::model::ReconResult;

use crate::archive::package_zip;
use crate::csv::export;
use crate::error::IoError;

/// Files written by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub csv_path: PathBuf,
    pub archive_path: Option<PathBuf>,
    pub rows: usize,
}

/// Accepts the filtered output of a run for persistence.
pub trait ResultSink {
    fn persist(&self, result: &ReconResult) -> Result<SinkReport, IoError>;
}

/// Writes the output CSV, and optionally a zip of it, into a directory.
#[derive(Debug, Clone)]
pub struct LocalSink {
    pub dir: PathBuf,
    pub csv_name: String,
    pub archive_name: Option<String>,
}

impl LocalSink {
    pub fn from_config(config: &OutputConfig, base_dir: &Path) -> Self {
        Self {
            dir: base_dir.join(&config.dir),
            csv_name: config.csv.clone(),
            archive_name: config.archive_name().map(String::from),
        }
    }
}

impl ResultSink for LocalSink {
    fn persist(&self, result: &ReconResult) -> Result<SinkReport, IoError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| IoError::Write {
            path: self.dir.display().to_string(),
            message: e.to_string(),
        })?;

        let csv_path = self.dir.join(&self.csv_name);
        export(&csv_path, &result.headers, &result.output)?;

        let archive_path = match self.archive_name {
            Some(ref name) => {
                let path = self.dir.join(name);
                package_zip(&csv_path, &path)?;
                Some(path)
            }
            None => None,
        };

        tracing::info!(
            csv = %csv_path.display(),
            rows = result.output.len(),
            "wrote bulk-import file"
        );

        Ok(SinkReport {
            csv_path,
            archive_path,
            rows: result.output.len(),
        })
    }
}
