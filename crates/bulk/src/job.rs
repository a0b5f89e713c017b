//! Bulk-import job payload.

use serde::Serialize;

use rosterlink_recon::config::SubmitConfig;

/// Imported rows always land on contact records.
pub const RESOURCE_TYPE: &str = "Contacts";
pub const ACTION_TYPE: &str = "loadMappedFile";
pub const COLUMN_DELIMITER: &str = "csv";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportJob {
    pub file: JobFile,
    pub description: String,
    pub actions: Vec<JobAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFile {
    pub file_name: String,
    pub has_header: bool,
    pub has_quotes: bool,
    pub source_url: String,
    pub columns: Vec<JobColumn>,
    pub column_delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobColumn {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAction {
    pub result_file_size_kb_limit: u32,
    pub resource_type: String,
    pub action_type: String,
    pub mapping_types: Vec<MappingType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingType {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_value_mappings: Vec<FieldValueMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValueMapping {
    pub field_name: String,
    pub column_name: String,
}

impl BulkImportJob {
    /// Build the job for an export described by `[submit]`.
    ///
    /// The export writer quotes fields that need it, so `hasQuotes` is set.
    pub fn from_config(config: &SubmitConfig) -> Self {
        let mapping_types = config
            .mappings
            .iter()
            .map(|m| MappingType {
                name: m.name.clone(),
                field_value_mappings: m
                    .fields
                    .iter()
                    .map(|f| FieldValueMapping {
                        field_name: f.field_name.clone(),
                        column_name: f.column_name.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            file: JobFile {
                file_name: config.file_name.clone(),
                has_header: true,
                has_quotes: true,
                source_url: config.source_url.clone(),
                columns: config
                    .columns
                    .iter()
                    .map(|name| JobColumn { name: name.clone() })
                    .collect(),
                column_delimiter: COLUMN_DELIMITER.into(),
            },
            description: config.description.clone(),
            actions: vec![JobAction {
                result_file_size_kb_limit: config.result_file_size_kb_limit,
                resource_type: RESOURCE_TYPE.into(),
                action_type: ACTION_TYPE.into(),
                mapping_types,
            }],
        }
    }
}
