//! Bulk-import HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).

use std::time::Duration;

use crate::job::BulkImportJob;

/// Basic-auth credentials, supplied by the caller (flags or environment).
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error type for bulk-import operations.
#[derive(Debug)]
pub enum BulkError {
    /// Client construction or transport failure
    Network(String),
    /// Credentials rejected (401/403)
    Auth(u16, String),
    /// Any other non-success status
    Http(u16, String),
}

impl std::fmt::Display for BulkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkError::Network(msg) => write!(f, "Network error: {}", msg),
            BulkError::Auth(code, msg) => write!(f, "Authentication failed (HTTP {}): {}", code, msg),
            BulkError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
        }
    }
}

impl std::error::Error for BulkError {}

/// What the API answered. Informational only.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubmitReceipt {
    pub status: u16,
    pub job_id: Option<String>,
    pub body: serde_json::Value,
}

/// Bulk-import API client (blocking).
#[derive(Clone)]
pub struct BulkImportClient {
    http: reqwest::blocking::Client,
    api_base: String,
    credentials: Credentials,
}

impl BulkImportClient {
    pub fn new(api_base: &str, credentials: Credentials) -> Result<Self, BulkError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("rlink/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BulkError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn jobs_url(&self) -> String {
        format!("{}/bulkImportJobs", self.api_base)
    }

    /// Submit a bulk-import job.
    pub fn submit(&self, job: &BulkImportJob) -> Result<SubmitReceipt, BulkError> {
        let url = self.jobs_url();
        tracing::info!(url = %url, file = %job.file.file_name, "submitting bulk-import job");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("accept", "application/json")
            .json(job)
            .send()
            .map_err(|e| BulkError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let success = response.status().is_success();
        let text = response.text().unwrap_or_default();

        if status == 401 || status == 403 {
            return Err(BulkError::Auth(status, text));
        }
        if !success {
            return Err(BulkError::Http(status, text));
        }

        let body = serde_json::from_str::<serde_json::Value>(&text)
            .unwrap_or(serde_json::Value::String(text));
        let job_id = body["jobId"]
            .as_i64()
            .map(|n| n.to_string())
            .or_else(|| body["jobId"].as_str().map(String::from));

        tracing::debug!(status, job_id = ?job_id, "bulk-import job accepted");

        Ok(SubmitReceipt {
            status,
            job_id,
            body,
        })
    }
}
