//! Result and Error types for fctools-experimental

/// Type alias for Result<T, experimental::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fctools-experimental` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("mismatched identity: {0}")]
    MismatchedIdentity(String),

    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("failed detector reduction")]
    DetectorError(#[from] fctools_detector::Error),

    #[error("failed to propagate uncertainty")]
    QuantityError(#[from] fctools_quantity::Error),
}
