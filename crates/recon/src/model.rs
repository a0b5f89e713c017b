use serde::Serialize;

use crate::classify::Role;
use crate::matcher::Resolution;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single event row. `values` lines up with `EventTable::headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub values: Vec<String>,
    pub custom_field_blob: Option<String>,
}

/// Materialized event rows with their original column order.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    pub headers: Vec<String>,
    pub rows: Vec<EventRow>,
}

/// Events plus the reference group names they are resolved against.
#[derive(Debug)]
pub struct ReconInput {
    pub events: EventTable,
    pub reference: Vec<String>,
}

// ---------------------------------------------------------------------------
// Augmented records
// ---------------------------------------------------------------------------

/// An event after role, group, and match derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEvent {
    /// Position of the row in the input.
    pub index: usize,
    pub values: Vec<String>,
    pub role: Option<Role>,
    pub role_code: Option<String>,
    pub group: Option<String>,
    pub resolution: Resolution,
}

impl ResolvedEvent {
    pub fn match_name(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Matched { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn certainty(&self) -> Option<f64> {
        match self.resolution {
            Resolution::Matched { score, .. } => Some(score),
            _ => None,
        }
    }

    /// Both a role and a match: eligible for the terminal output.
    pub fn is_exportable(&self) -> bool {
        self.role.is_some() && self.resolution.is_match()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub total_events: usize,
    pub with_role: usize,
    pub leaders: usize,
    pub members: usize,
    pub with_group: usize,
    pub matched: usize,
    pub below_cutoff: usize,
    pub no_candidates: usize,
    pub exported: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub cutoff: f64,
    pub role_field: String,
    pub group_field: String,
    pub reference_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub headers: Vec<String>,
    /// Every input event in input order, before filtering.
    #[serde(skip)]
    pub records: Vec<ResolvedEvent>,
    /// Events with both a role and a match, in input order.
    pub output: Vec<ResolvedEvent>,
}
