//! Custom-field blob grammar.
//!
//! A blob is a list of tagged entries, each pairing a `custom_field_id` with a
//! `text_value`. Well-formed JSON is walked structurally. Anything else
//! (truncated exports, Python-style quoting) falls back to a leftmost,
//! non-greedy scan compiled once per field identifier.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ReconError;

pub const ID_KEY: &str = "custom_field_id";
pub const VALUE_KEY: &str = "text_value";

/// One identifier/value pair from a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub field_id: String,
    pub text_value: Option<String>,
}

/// Parse a blob as JSON entries, in document order.
///
/// Accepts any JSON array or object. Entries are objects carrying a
/// `custom_field_id`, at any depth (so wrapper objects such as
/// `{"responses": [...]}` work). An entry's value is its own `text_value`,
/// or else the first `text_value` nested inside it. Returns `None` when
/// the blob is not a JSON array or object.
pub fn parse_entries(blob: &str) -> Option<Vec<FieldEntry>> {
    let value: Value = serde_json::from_str(blob).ok()?;
    if !(value.is_array() || value.is_object()) {
        return None;
    }
    let mut entries = Vec::new();
    collect_entries(&value, &mut entries);
    Some(entries)
}

fn collect_entries(value: &Value, out: &mut Vec<FieldEntry>) {
    match value {
        Value::Object(obj) => match obj.get(ID_KEY).and_then(scalar_text) {
            Some(field_id) => out.push(FieldEntry {
                field_id,
                text_value: entry_value(obj),
            }),
            None => obj.values().for_each(|v| collect_entries(v, out)),
        },
        Value::Array(items) => items.iter().for_each(|v| collect_entries(v, out)),
        _ => {}
    }
}

fn entry_value(obj: &Map<String, Value>) -> Option<String> {
    if let Some(direct) = obj.get(VALUE_KEY) {
        return scalar_text(direct);
    }
    obj.iter()
        .filter(|(key, _)| key.as_str() != ID_KEY)
        .find_map(|(_, v)| nested_value(v))
}

/// First `text_value` below `value`, not descending into other entries.
fn nested_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) if obj.contains_key(ID_KEY) => None,
        Value::Object(obj) => match obj.get(VALUE_KEY) {
            Some(v) => scalar_text(v),
            None => obj.values().find_map(nested_value),
        },
        Value::Array(items) => items.iter().find_map(nested_value),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// FieldExtractor
// ---------------------------------------------------------------------------

/// Extracts the text value of one field identifier from custom-field blobs.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    field_id: String,
    lenient: Regex,
}

impl FieldExtractor {
    pub fn new(field_id: &str) -> Result<Self, ReconError> {
        let field_id = field_id.trim();
        if field_id.is_empty() {
            return Err(ReconError::InvalidFieldId {
                field: "custom".into(),
                value: field_id.into(),
            });
        }

        let id = regex::escape(field_id);
        let pattern = format!(
            r##"\b{key}["']?\s*:\s*(?:["']{id}["']|{id}[,\s}}\]]).*?\b{val}["']?\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"##,
            key = ID_KEY,
            val = VALUE_KEY,
        );
        let lenient = Regex::new(&pattern).map_err(|_| ReconError::InvalidFieldId {
            field: "custom".into(),
            value: field_id.into(),
        })?;

        Ok(Self {
            field_id: field_id.to_string(),
            lenient,
        })
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Trimmed text value of the first entry carrying this identifier.
    ///
    /// Absent blob, missing entry, or an entry without a text value all
    /// yield `None`. Later entries with the same identifier are ignored.
    /// JSON without a matching entry is still scanned leniently.
    pub fn extract(&self, blob: Option<&str>) -> Option<String> {
        let blob = blob?;
        let value = match parse_entries(blob) {
            Some(entries) => match entries.into_iter().find(|e| e.field_id.trim() == self.field_id) {
                Some(entry) => entry.text_value?,
                // Identifier held somewhere the entry walk does not reach
                None => self.scan(blob)?,
            },
            None => {
                tracing::warn!(field_id = %self.field_id, "blob is not JSON, scanning leniently");
                self.scan(blob)?
            }
        };
        Some(value.trim().to_string())
    }

    fn scan(&self, blob: &str) -> Option<String> {
        let caps = self.lenient.captures(blob)?;
        if let Some(double) = caps.get(1) {
            return Some(decode_escapes(double.as_str()));
        }
        caps.get(2).map(|single| single.as_str().replace("\\'", "'"))
    }
}

/// Decode JSON string escapes, keeping the raw text when they are invalid.
fn decode_escapes(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}
