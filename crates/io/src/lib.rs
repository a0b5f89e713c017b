//! `rosterlink-io`: local collaborators around the reconciliation engine.
//!
//! CSV sources for events and reference names, the flat-file export of the
//! filtered output, and zip packaging of that file.

pub mod archive;
pub mod csv;
pub mod error;
pub mod sink;
pub mod source;

pub use error::IoError;
pub use sink::{LocalSink, ResultSink, SinkReport};
pub use source::{CsvSource, RecordSource};
