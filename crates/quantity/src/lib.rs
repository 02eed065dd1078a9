//! Measured values with absolute uncertainty
//!
//! A [Quantity] is the propagation primitive for every reduction step, from
//! raw counts through to C/E. The uncertainty is always stored as an absolute
//! value, and the relative view is derived on request so the two can never
//! drift apart.
//!
//! ```rust
//! # use fctools_quantity::Quantity;
//! let counts = Quantity::from_counts(400.0).unwrap();
//! let time = Quantity::exact(100.0).unwrap();
//!
//! // Dividing by an exact value keeps the relative uncertainty
//! let rate = counts.divide(time).unwrap();
//! assert_eq!(rate.value(), 4.0);
//! assert_eq!(rate.relative_uncertainty(), Some(0.05));
//! ```
//!
//! Only the propagation rules the reduction chain needs are implemented:
//!
//! - addition and subtraction combine absolute uncertainties in quadrature
//! - multiplication and division combine relative uncertainties in quadrature
//! - scaling by an exact constant scales the uncertainty linearly, through
//!   the fallible [Quantity::scale]
//! - [weighted_mean] combines independent estimates with inverse-variance
//!   weights
//!
//! There is no `/` operator between quantities. Division goes through
//! [Quantity::divide], where a zero denominator is an error and never a `NaN`.

mod error;
mod quantity;
mod summary;

#[doc(inline)]
pub use quantity::{weighted_mean, Quantity};

#[doc(inline)]
pub use summary::Summary;

#[doc(inline)]
pub use error::{Error, Result};
