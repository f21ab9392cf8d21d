//! Error types for lpwan-metrics
//!
//! Missing or unparseable metric fields are NOT errors: the extractor
//! resolves them to zero. Errors are reserved for inputs that cannot be read
//! at all, records whose technology cannot be determined, and aggregate
//! operations over an empty dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// lpwan-metrics error types
#[derive(Error, Debug)]
pub enum Error {
    /// Raw input could not be opened or read
    #[error("Input unavailable: {path}: {source}")]
    InputUnavailable {
        /// Path of the input that failed
        path: PathBuf,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// Neither the marker line nor the external hint names a known technology
    #[error("Unknown technology: {0}\nExpected one of NBIOT, LORAWAN, SIGFOX (marker line or file name)")]
    UnknownTechnology(String),

    /// No input produced a record; aggregates are undefined
    #[error("Empty dataset: no input produced a record, statistics are undefined")]
    EmptyDataset,

    /// Invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Metric label pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Storage error (Parquet/Arrow conversion)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error (configuration, chart payloads)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report rendering error
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}
