//! Module for the value/uncertainty pair and its propagation rules

// internal modules
use crate::error::{Error, Result};
use crate::summary::Summary;

// fctools modules
use fctools_utils::{f, ValueExt};

// external crates
use log::trace;
use serde::{Deserialize, Serialize};

// standard library
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// A measured or derived value with an absolute uncertainty
///
/// The fields are private and every constructor, including deserialisation,
/// rejects non-finite input, so the uncertainty is never negative or `NaN`.
///
/// Operators are implemented where the propagation is total, namely Addition
/// (`+`, `+=`), Subtraction (`-`, `-=`), and Multiplication (`*`, `*=`)
/// between quantities. These follow IEEE arithmetic and can only leave the
/// finite range by overflowing.
///
/// Division and scaling are fallible, see [Quantity::divide] and
/// [Quantity::scale].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuantity")]
pub struct Quantity {
    value: f64,
    uncertainty: f64,
}

impl Quantity {
    /// Create a new quantity from a value and an absolute uncertainty
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// assert!(Quantity::new(10.0, 0.5).is_ok());
    /// assert!(Quantity::new(10.0, -0.5).is_err());
    /// assert!(Quantity::new(10.0, f64::NAN).is_err());
    /// ```
    pub fn new(value: f64, uncertainty: f64) -> Result<Self> {
        if !value.is_finite() || !uncertainty.is_finite() || uncertainty < 0.0 {
            return Err(Error::InvalidUncertainty { value, uncertainty });
        }
        Ok(Self { value, uncertainty })
    }

    /// A value known exactly, such as a time or a constant
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// assert!(Quantity::exact(600.0).unwrap().is_exact());
    /// assert!(Quantity::exact(f64::INFINITY).is_err());
    /// ```
    pub fn exact(value: f64) -> Result<Self> {
        Self::new(value, 0.0)
    }

    /// Poisson counting statistics, `N +/- sqrt(N)`
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// let counts = Quantity::from_counts(100.0).unwrap();
    /// assert_eq!(counts.uncertainty(), 10.0);
    /// ```
    pub fn from_counts(counts: f64) -> Result<Self> {
        if !counts.is_finite() || counts < 0.0 {
            return Err(Error::InvalidCounts(counts));
        }
        Ok(Self {
            value: counts,
            uncertainty: counts.sqrt(),
        })
    }

    /// Central value
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Absolute uncertainty on the value
    pub const fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Relative uncertainty, undefined for a zero value
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// let q = Quantity::new(-50.0, 5.0).unwrap();
    /// assert_eq!(q.relative_uncertainty(), Some(0.1));
    /// assert_eq!(Quantity::exact(0.0).unwrap().relative_uncertainty(), None);
    /// ```
    pub fn relative_uncertainty(&self) -> Option<f64> {
        if self.value == 0.0 {
            None
        } else {
            Some(self.uncertainty / self.value.abs())
        }
    }

    /// Relative uncertainty as a percentage, undefined for a zero value
    pub fn relative_uncertainty_percent(&self) -> Option<f64> {
        self.relative_uncertainty().map(|r| r * 100.0)
    }

    /// Check if the quantity carries no uncertainty
    pub fn is_exact(&self) -> bool {
        self.uncertainty == 0.0
    }

    /// Divide by another quantity
    ///
    /// Relative uncertainties combine in quadrature. The propagation is done
    /// on absolute terms so that a zero numerator is still well defined.
    ///
    /// A zero-valued denominator is always an error, even for an exact one.
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// let a = Quantity::new(30.0, 3.0).unwrap();
    /// let b = Quantity::new(10.0, 1.0).unwrap();
    ///
    /// let ratio = a.divide(b).unwrap();
    /// assert_eq!(ratio.value(), 3.0);
    /// assert!((ratio.relative_uncertainty().unwrap() - 0.1 * 2f64.sqrt()).abs() < 1e-12);
    ///
    /// assert!(a.divide(Quantity::exact(0.0).unwrap()).is_err());
    /// ```
    pub fn divide(self, rhs: Self) -> Result<Self> {
        if rhs.value == 0.0 {
            return Err(Error::DegenerateUncertainty(f!(
                "division of {self} by a zero-valued quantity"
            )));
        }

        let value = self.value / rhs.value;
        let uncertainty =
            (self.uncertainty / rhs.value).hypot(self.value * rhs.uncertainty / rhs.value.powi(2));

        trace!("{self} / {rhs} = {value} +/- {uncertainty}");
        Self::new(value, uncertainty.abs()).map_err(|_| {
            Error::DegenerateUncertainty(f!("division of {self} by {rhs} overflows"))
        })
    }

    /// Scale by an exact constant
    ///
    /// The constant contributes no uncertainty of its own, so the relative
    /// uncertainty is unchanged. Fails for a non-finite factor or a result
    /// that overflows.
    ///
    /// ```rust
    /// # use fctools_quantity::Quantity;
    /// let q = Quantity::new(2.0, 0.5).unwrap().scale(-4.0).unwrap();
    /// assert_eq!(q.value(), -8.0);
    /// assert_eq!(q.uncertainty(), 2.0);
    ///
    /// assert!(q.scale(f64::NAN).is_err());
    /// ```
    pub fn scale(self, factor: f64) -> Result<Self> {
        Self::new(self.value * factor, self.uncertainty * factor.abs())
    }

    /// Tabular view with the derived percentage
    pub fn summary(&self) -> Summary {
        Summary::from(*self)
    }
}

/// Inverse-variance weighted mean of independent estimates
///
/// Each estimate is weighted by `1/σ²` and the result has an uncertainty of
/// `1/sqrt(Σw)`. The weights are taken relative to the smallest `σ`, so
/// very small uncertainties cannot overflow them.
///
/// A zero-uncertainty member would have an infinite weight, so it is taken as
/// exact and becomes the result. Exact members that disagree cannot be
/// reconciled and are an error, as is an empty input.
///
/// ```rust
/// # use fctools_quantity::{weighted_mean, Quantity};
/// let estimates = [
///     Quantity::new(10.0, 1.0).unwrap(),
///     Quantity::new(12.0, 1.0).unwrap(),
/// ];
///
/// let mean = weighted_mean(&estimates).unwrap();
/// assert_eq!(mean.value(), 11.0);
/// assert_eq!(mean.uncertainty(), 1.0 / 2f64.sqrt());
/// ```
pub fn weighted_mean(quantities: &[Quantity]) -> Result<Quantity> {
    let (first, rest) = quantities.split_first().ok_or(Error::EmptySequence)?;
    if rest.is_empty() {
        return Ok(*first);
    }

    // exact members override the statistical mean
    let mut exact = quantities.iter().filter(|q| q.is_exact());
    if let Some(reference) = exact.next() {
        if let Some(other) = exact.find(|q| q.value != reference.value) {
            return Err(Error::DegenerateUncertainty(f!(
                "exact values {} and {} cannot be averaged",
                reference.value,
                other.value
            )));
        }
        trace!("weighted mean overridden by exact value {}", reference.value);
        return Ok(*reference);
    }

    // non-zero, every member has an uncertainty here
    let sigma_min = quantities
        .iter()
        .map(|q| q.uncertainty)
        .fold(f64::INFINITY, f64::min);

    // relative weights (σ_min/σ)², at most one each
    let (sum_w, sum_wv) = quantities.iter().fold((0.0, 0.0), |(sw, swv), q| {
        let w = (sigma_min / q.uncertainty).powi(2);
        (sw + w, swv + w * q.value)
    });

    Quantity::new(sum_wv / sum_w, sigma_min / sum_w.sqrt()).map_err(|_| {
        Error::DegenerateUncertainty(f!(
            "weighted mean of {} estimates is not finite",
            quantities.len()
        ))
    })
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} +/- {}",
            self.value.sci(5, 2),
            self.uncertainty.sci(5, 2)
        )
    }
}

impl Add<Self> for Quantity {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            uncertainty: self.uncertainty.hypot(rhs.uncertainty),
        }
    }
}

impl AddAssign<Self> for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub<Self> for Quantity {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            uncertainty: self.uncertainty.hypot(rhs.uncertainty),
        }
    }
}

impl SubAssign<Self> for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<Self> for Quantity {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            uncertainty: (self.uncertainty * rhs.value).hypot(self.value * rhs.uncertainty),
        }
    }
}

impl MulAssign<Self> for Quantity {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Unchecked intermediate for deserialising through [Quantity::new]
#[derive(Deserialize)]
struct RawQuantity {
    value: f64,
    uncertainty: f64,
}

impl TryFrom<RawQuantity> for Quantity {
    type Error = Error;
    fn try_from(raw: RawQuantity) -> Result<Self> {
        Quantity::new(raw.value, raw.uncertainty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtraction_adds_absolute_uncertainties() {
        let a = Quantity::new(10.0, 3.0).unwrap();
        let b = Quantity::new(4.0, 4.0).unwrap();
        let d = a - b;
        assert_eq!(d.value(), 6.0);
        assert_eq!(d.uncertainty(), 5.0);
    }

    #[test]
    fn zero_numerator_is_well_defined() {
        let zero = Quantity::new(0.0, 1.0).unwrap();
        let q = zero.divide(Quantity::exact(4.0).unwrap()).unwrap();
        assert_eq!(q.value(), 0.0);
        assert_eq!(q.uncertainty(), 0.25);
    }

    #[test]
    fn exact_members_must_agree() {
        let values = [
            Quantity::exact(1.0).unwrap(),
            Quantity::new(5.0, 1.0).unwrap(),
            Quantity::exact(2.0).unwrap(),
        ];
        assert!(matches!(
            weighted_mean(&values),
            Err(Error::DegenerateUncertainty(_))
        ));
    }

    #[test]
    fn tiny_uncertainties_do_not_overflow_weights() {
        let values = [
            Quantity::new(1.0, 1e-200).unwrap(),
            Quantity::new(2.0, 1e-200).unwrap(),
        ];
        let mean = weighted_mean(&values).unwrap();
        assert_eq!(mean.value(), 1.5);
        assert_eq!(mean.uncertainty(), 1e-200 / 2f64.sqrt());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(Quantity::exact(f64::INFINITY).is_err());
        assert!(Quantity::exact(f64::NAN).is_err());

        let q = Quantity::new(2.0, 0.5).unwrap();
        assert!(q.scale(f64::NAN).is_err());
        assert!(q.scale(f64::MAX).is_err());

        let huge = Quantity::new(f64::MAX, 0.0).unwrap();
        assert!(matches!(
            huge.divide(Quantity::new(0.5, 0.0).unwrap()),
            Err(Error::DegenerateUncertainty(_))
        ));
    }

    #[test]
    fn empty_mean() {
        assert_eq!(weighted_mean(&[]), Err(Error::EmptySequence));
    }
}
