use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad cutoff, empty codes, etc.).
    ConfigValidation(String),
    /// A field identifier is empty or cannot be compiled into a pattern.
    InvalidFieldId { field: String, value: String },
    /// Cutoff outside [0, 1] or not a finite number.
    CutoffOutOfRange(f64),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidFieldId { field, value } => {
                write!(f, "invalid {field} field identifier: '{value}'")
            }
            Self::CutoffOutOfRange(cutoff) => {
                write!(f, "cutoff must be within [0, 1], got {cutoff}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
