//! Error kinds for the power consumption core

use thiserror::Error;

/// Errors raised while loading, aggregating or querying the dataset
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A source row lacks a required field or carries an unparseable value.
    /// Fatal: the whole load is aborted.
    #[error("Malformed row at line {line}: field '{field}' {reason}")]
    MalformedRow {
        line: u64,
        field: String,
        reason: String,
    },

    /// A (year, week, day) triple that does not name a calendar date
    #[error("Invalid date components: {0}")]
    InvalidDateComponents(String),

    /// A grouping request matched no rows
    #[error("No data for {0}")]
    EmptyGroup(String),

    #[error("Unknown month name: {0}")]
    UnknownMonth(String),

    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    /// Whether an interaction may degrade to an empty view instead of failing
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidDateComponents(_) | DashboardError::EmptyGroup(_)
        )
    }
}

/// Result alias used across the core
pub type DashboardResult<T> = Result<T, DashboardError>;
