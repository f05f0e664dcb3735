//! Custom error types for the converter.
//!
//! `ConvertError` is the single error type returned by the library. It only
//! covers failures that abort a run:
//!
//! - **`Configuration`**: semantic problems with the requested run, such as a
//!   missing input file, an output name without a `.mtscan`/`.mtscan.gz`
//!   extension or an inverted date window. Reported before any row is read.
//! - **`Config`**: the layered configuration (TOML file + environment) could
//!   not be extracted.
//! - **`Io`**: reading the input or writing the output failed.
//! - **`Csv`**: the CSV reader hit an I/O level failure. Rows with too few
//!   columns are not errors; the reader is flexible and such rows are counted
//!   as malformed instead.
//! - **`Serialization`**: the aggregate could not be encoded as JSON.
//!
//! Per-row data problems never surface here, they only bump a counter in
//! [`crate::stats::RunStatistics`].

use thiserror::Error;

/// Convenience alias for results using the converter error type.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors raised while configuring or running a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Invalid option or setting value.
    #[error("Configuration validation error: {0}")]
    Configuration(String),

    /// Configuration file or environment could not be extracted.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not parseable as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<figment::Error> for ConvertError {
    fn from(value: figment::Error) -> Self {
        ConvertError::Config(Box::new(value))
    }
}

impl ConvertError {
    /// Returns true for errors raised while validating the requested run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ConvertError::Configuration(_) | ConvertError::Config(_))
    }
}
