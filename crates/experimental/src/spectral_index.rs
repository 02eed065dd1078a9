//! Module for ratios of fission rates of two deposits

// internal modules
use crate::error::{Error, Result};
use crate::normalized::NormalizedFissionFragmentSpectrum;

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use log::debug;

/// Ratio of the fission rates of two deposits at the same location
///
/// Both legs must come from the same experiment and location, and the order
/// matters: [SpectralIndex::deposit_ids()] is always `[numerator,
/// denominator]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralIndex<'a> {
    numerator: NormalizedFissionFragmentSpectrum<'a>,
    denominator: NormalizedFissionFragmentSpectrum<'a>,
}

impl<'a> SpectralIndex<'a> {
    /// Pair two normalised rates
    pub fn new(
        numerator: NormalizedFissionFragmentSpectrum<'a>,
        denominator: NormalizedFissionFragmentSpectrum<'a>,
    ) -> Result<Self> {
        if numerator.experiment_id() != denominator.experiment_id()
            || numerator.location_id() != denominator.location_id()
        {
            return Err(Error::MismatchedIdentity(f!(
                "{} at {} in {} cannot be paired with {} at {} in {}",
                numerator.deposit_id(),
                numerator.location_id(),
                numerator.experiment_id(),
                denominator.deposit_id(),
                denominator.location_id(),
                denominator.experiment_id()
            )));
        }

        if numerator.deposit_id() == denominator.deposit_id() {
            return Err(Error::Validation(f!(
                "a spectral index needs two deposits, both legs are {}",
                numerator.deposit_id()
            )));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Leg above the fraction bar
    pub fn numerator(&self) -> &NormalizedFissionFragmentSpectrum<'a> {
        &self.numerator
    }

    /// Leg below the fraction bar
    pub fn denominator(&self) -> &NormalizedFissionFragmentSpectrum<'a> {
        &self.denominator
    }

    /// Deposits as `[numerator, denominator]`
    pub fn deposit_ids(&self) -> [String; 2] {
        [
            self.numerator.deposit_id().to_string(),
            self.denominator.deposit_id().to_string(),
        ]
    }

    /// Shared location of both legs
    pub fn location_id(&self) -> &str {
        self.numerator.location_id()
    }

    /// Shared experiment of both legs
    pub fn experiment_id(&self) -> &str {
        self.numerator.experiment_id()
    }

    /// Ratio of the two normalised rates
    pub fn value(&self) -> Result<Quantity> {
        let value = self.numerator.value()?.divide(self.denominator.value()?)?;
        debug!(
            "Spectral index {}/{} at {}: {value}",
            self.numerator.deposit_id(),
            self.denominator.deposit_id(),
            self.location_id()
        );
        Ok(value)
    }
}
