//! # Gate Records Module
//!
//! Maps the rows of a decoded gate sheet onto typed [`GateRecord`]s and
//! answers simple queries over the result.
//!
//! - [`schema`] declares the column layout once.
//! - [`build`] is a pure function from a [`RawTable`](crate::spreadsheet::RawTable)
//!   to a [`GateSet`]: the records, the rows that were dropped and why, and
//!   advisory warnings about the table shape.
//! - [`GateBook`] holds the current set for callers that load repeatedly.
use serde::Serialize;
use thiserror::Error;

pub mod builder;
pub mod query;
pub mod record;
pub mod schema;

pub use builder::{build, BuildOptions, BuildWarning, RowError, RowFailure};
pub use query::{GateBook, Summary};
pub use record::GateRecord;

/// Errors that abort a gate operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The input table has no data rows
    #[error("Input table has no data rows")]
    DataEmpty,

    /// A query ran before any successful build
    #[error("No gate records loaded, run a successful build first")]
    NotLoaded,
}

/// Result of one build: records in source order plus the rows that failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GateSet {
    pub records: Vec<GateRecord>,
    pub failures: Vec<RowFailure>,
    pub warnings: Vec<BuildWarning>,
}
