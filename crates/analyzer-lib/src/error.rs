//! Error types for cost analysis

use thiserror::Error;

/// Errors raised while classifying or aggregating cost records
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A usage field could not be normalized to a number.
    ///
    /// Corrupt percentages are never silently coerced to zero; the caller
    /// sees the offending value.
    #[error("invalid usage value: {0:?}")]
    InvalidUsageValue(String),
}

/// Errors raised while reading cost records from CSV
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input could not be read or parsed as CSV at all
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// Every row was malformed or otherwise filtered out
    #[error("no valid cost records found in input")]
    NoValidRecords,
}
