//! `rosterlink-recon`: custom-field extraction and fuzzy group reconciliation.
//!
//! Pure engine crate: receives pre-loaded events and reference names, returns
//! augmented and filtered records. No CLI, file, or network dependencies.

pub mod blob;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod matcher;
pub mod model;
pub mod similarity;
pub mod summary;

pub use blob::FieldExtractor;
pub use classify::{classify, Role, RoleCodes};
pub use config::RunConfig;
pub use engine::{filter_exportable, run, Pipeline};
pub use error::ReconError;
pub use matcher::{EntityResolver, Resolution};
pub use model::{EventRow, EventTable, ReconInput, ReconResult, ResolvedEvent};
