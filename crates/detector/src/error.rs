//! Result and Error types for fctools-detector

use chrono::NaiveDateTime;

/// Type alias for Result<T, detector::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fctools-detector` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("mismatched identity: {0}")]
    MismatchedIdentity(String),

    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("no samples in the window ({start}, {end}]")]
    EmptyWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("failed to propagate uncertainty")]
    QuantityError(#[from] fctools_quantity::Error),

    #[error("failed slice operation")]
    SliceError(#[from] fctools_utils::Error),

    #[error("failed to read tabular data")]
    CsvError(#[from] csv::Error),
}
