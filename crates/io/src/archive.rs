// Zip packaging for the bulk-import file

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::IoError;

/// Package `source` as the single deflated entry of a new zip at `archive`.
/// The entry is named after the source file.
pub fn package_zip(source: &Path, archive: &Path) -> Result<(), IoError> {
    let entry_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IoError::Archive(format!("{} has no file name", source.display())))?;

    let data = std::fs::read(source).map_err(|e| IoError::Read {
        path: source.display().to_string(),
        message: e.to_string(),
    })?;

    let file = File::create(archive).map_err(|e| IoError::Write {
        path: archive.display().to_string(),
        message: e.to_string(),
    })?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(entry_name, options)
        .map_err(|e| IoError::Archive(e.to_string()))?;
    zip.write_all(&data)
        .map_err(|e| IoError::Archive(e.to_string()))?;
    zip.finish().map_err(|e| IoError::Archive(e.to_string()))?;

    tracing::debug!(archive = %archive.display(), bytes = data.len(), "packaged archive");
    Ok(())
}
