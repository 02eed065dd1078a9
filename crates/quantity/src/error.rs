//! Result and Error types for fctools-quantity

/// Type alias for Result<T, quantity::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fctools-quantity` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("uncertainty must be finite and non-negative (value {value}, uncertainty {uncertainty})")]
    InvalidUncertainty { value: f64, uncertainty: f64 },

    #[error("counts must be finite and non-negative, found {0}")]
    InvalidCounts(f64),

    #[error("degenerate uncertainty: {0}")]
    DegenerateUncertainty(String),

    #[error("no quantities to combine")]
    EmptySequence,
}
