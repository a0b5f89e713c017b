// CSV import/export for events, reference names, and the bulk-import file

use std::io::{Read, Write};
use std::path::Path;

use rosterlink_recon::model::{EventRow, EventTable, ResolvedEvent};

use crate::error::IoError;

/// Columns appended after the original event columns on export.
pub const DERIVED_COLUMNS: [&str; 4] = ["role_code", "group", "match", "certainty"];

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |e: std::io::Error| IoError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for spreadsheet-exported CSVs)
            tracing::warn!(path = %path.display(), "file is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn header_index(headers: &[String], file: &str, column: &str) -> Result<usize, IoError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| IoError::MissingColumn {
            file: file.into(),
            column: column.into(),
        })
}

/// Export columns must not shadow an input column of the same name.
fn check_reserved(headers: &[String], file: &str) -> Result<(), IoError> {
    match headers.iter().find(|h| DERIVED_COLUMNS.contains(&h.as_str())) {
        Some(column) => Err(IoError::ReservedColumn {
            file: file.into(),
            column: column.clone(),
        }),
        None => Ok(()),
    }
}

/// Parse an events CSV. Every column is kept; `blob_column` also feeds the
/// custom-field blob, with empty cells treated as absent.
pub fn load_events(file: &str, content: &str, blob_column: &str) -> Result<EventTable, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let blob_idx = header_index(&headers, file, blob_column)?;
    check_reserved(&headers, file)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut values: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        values.resize(headers.len(), String::new());

        let blob = &values[blob_idx];
        let custom_field_blob = (!blob.trim().is_empty()).then(|| blob.clone());
        rows.push(EventRow {
            values,
            custom_field_blob,
        });
    }

    tracing::debug!(file, rows = rows.len(), "loaded events");
    Ok(EventTable { headers, rows })
}

/// Parse the reference CSV into candidate names, in file order.
pub fn load_reference(file: &str, content: &str, name_column: &str) -> Result<Vec<String>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let name_idx = header_index(&headers, file, name_column)?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        names.push(record.get(name_idx).unwrap_or("").to_string());
    }

    tracing::debug!(file, names = names.len(), "loaded reference names");
    Ok(names)
}

/// Write the export table: original headers plus the derived columns.
/// Absent values are empty cells.
pub fn write_output<W: Write>(
    writer: W,
    headers: &[String],
    records: &[ResolvedEvent],
) -> Result<(), IoError> {
    check_reserved(headers, "export")?;
    let mut writer = csv::WriterBuilder::new().from_writer(writer);

    let mut header_row: Vec<&str> = headers.iter().map(|h| h.as_str()).collect();
    header_row.extend(DERIVED_COLUMNS);
    writer.write_record(&header_row)?;

    for r in records {
        let mut row: Vec<String> = r.values.clone();
        row.resize(headers.len(), String::new());
        row.push(r.role_code.clone().unwrap_or_default());
        row.push(r.group.clone().unwrap_or_default());
        row.push(r.match_name().unwrap_or_default().to_string());
        row.push(r.certainty().map(|c| format!("{c:.2}")).unwrap_or_default());
        writer.write_record(&row)?;
    }

    writer.flush().map_err(|e| IoError::Csv(e.to_string()))?;
    Ok(())
}

pub fn export(path: &Path, headers: &[String], records: &[ResolvedEvent]) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_output(std::io::BufWriter::new(file), headers, records)
}
