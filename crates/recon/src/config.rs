use serde::Deserialize;

use crate::classify::RoleCodes;
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub name: String,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    pub fields: FieldConfig,
    pub codes: RoleCodes,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub submit: Option<SubmitConfig>,
}

fn default_cutoff() -> f64 {
    0.8
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Custom-field identifiers read from each event's blob.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub role: String,
    pub group: String,
}

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_events_file")]
    pub events: String,
    #[serde(default = "default_reference_file")]
    pub reference: String,
    /// Column of the events file holding the custom-field blob.
    #[serde(default = "default_blob_column")]
    pub blob_column: String,
    /// Column of the reference file holding candidate group names.
    #[serde(default = "default_name_column")]
    pub name_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            events: default_events_file(),
            reference: default_reference_file(),
            blob_column: default_blob_column(),
            name_column: default_name_column(),
        }
    }
}

fn default_events_file() -> String {
    "events.csv".into()
}

fn default_reference_file() -> String {
    "groups.csv".into()
}

fn default_blob_column() -> String {
    "custom_field_responses".into()
}

fn default_name_column() -> String {
    "name".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_csv_name")]
    pub csv: String,
    /// Zip archive name. Empty skips packaging.
    #[serde(default = "default_archive_name")]
    pub archive: String,
    #[serde(default)]
    pub json: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            csv: default_csv_name(),
            archive: default_archive_name(),
            json: None,
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}

fn default_csv_name() -> String {
    "bulk_import.csv".into()
}

fn default_archive_name() -> String {
    "bulk_import.zip".into()
}

impl OutputConfig {
    pub fn archive_name(&self) -> Option<&str> {
        let name = self.archive.trim();
        (!name.is_empty()).then_some(name)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Bulk-import job settings. Credentials never live in the file; only the
/// names of the environment variables holding them.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConfig {
    pub api_base: String,
    pub file_name: String,
    pub source_url: String,
    #[serde(default = "default_description")]
    pub description: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
    #[serde(default = "default_result_limit")]
    pub result_file_size_kb_limit: u32,
    #[serde(default = "default_username_env")]
    pub username_env: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldMappingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldMappingConfig {
    pub field_name: String,
    pub column_name: String,
}

fn default_description() -> String {
    "Daily import matching individuals with groups and roles".into()
}

fn default_result_limit() -> u32 {
    5000
}

fn default_username_env() -> String {
    "BULK_IMPORT_USER".into()
}

fn default_password_env() -> String {
    "BULK_IMPORT_PASSWORD".into()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !self.cutoff.is_finite() || !(0.0..=1.0).contains(&self.cutoff) {
            return Err(ReconError::CutoffOutOfRange(self.cutoff));
        }

        if self.fields.role.trim().is_empty() {
            return Err(ReconError::InvalidFieldId {
                field: "role".into(),
                value: self.fields.role.clone(),
            });
        }
        if self.fields.group.trim().is_empty() {
            return Err(ReconError::InvalidFieldId {
                field: "group".into(),
                value: self.fields.group.clone(),
            });
        }
        if self.fields.role.trim() == self.fields.group.trim() {
            return Err(ReconError::ConfigValidation(format!(
                "role and group fields must differ, both are '{}'",
                self.fields.role.trim()
            )));
        }

        if self.codes.leader.trim().is_empty() || self.codes.member.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "leader and member codes must not be empty".into(),
            ));
        }

        if let Some(ref submit) = self.submit {
            if submit.columns.is_empty() {
                return Err(ReconError::ConfigValidation(
                    "submit.columns must list at least one column".into(),
                ));
            }
            for mapping in &submit.mappings {
                for field in &mapping.fields {
                    if !submit.columns.contains(&field.column_name) {
                        return Err(ReconError::ConfigValidation(format!(
                            "mapping '{}': column '{}' not in submit.columns",
                            mapping.name, field.column_name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
