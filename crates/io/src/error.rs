use std::fmt;

/// Error type for source and sink operations.
#[derive(Debug)]
pub enum IoError {
    /// File could not be read.
    Read { path: String, message: String },
    /// File or directory could not be written.
    Write { path: String, message: String },
    /// Malformed CSV content.
    Csv(String),
    /// Required column missing from a CSV header.
    MissingColumn { file: String, column: String },
    /// Input header reuses a column name the export appends.
    ReservedColumn { file: String, column: String },
    /// Zip packaging failed.
    Archive(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Write { path, message } => write!(f, "cannot write {path}: {message}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::MissingColumn { file, column } => {
                write!(f, "{file}: missing column '{column}'")
            }
            Self::ReservedColumn { file, column } => {
                write!(f, "{file}: column '{column}' collides with an export column")
            }
            Self::Archive(msg) => write!(f, "archive error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}
