//! Bulk-import API client. Submits a job pointing at an uploaded export.
//!
//! This crate owns the wire contract: job payload shape, basic auth, and the
//! submit call. No retries. The reconciliation output never depends on the
//! response.

mod client;
mod job;

pub use client::{BulkError, BulkImportClient, Credentials, SubmitReceipt};
pub use job::{
    BulkImportJob, FieldValueMapping, JobAction, JobColumn, JobFile, MappingType,
    ACTION_TYPE, COLUMN_DELIMITER, RESOURCE_TYPE,
};
