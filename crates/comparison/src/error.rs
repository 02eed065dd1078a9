//! Result and Error types for fctools-comparison

/// Type alias for Result<T, comparison::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fctools-comparison` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("mismatched identity: {0}")]
    MismatchedIdentity(String),

    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("failed to evaluate the experimental side")]
    ExperimentalError(#[from] fctools_experimental::Error),

    #[error("failed to propagate uncertainty")]
    QuantityError(#[from] fctools_quantity::Error),
}
