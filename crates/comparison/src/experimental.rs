//! Experimental side of a C/E comparison

// internal modules
use crate::calculated::SPECTRAL_INDEX_KEY;
use crate::error::Result;

// fctools modules
use fctools_experimental::{SpectralIndex, Traverse};
use fctools_quantity::Quantity;

/// Experimental side of a C/E comparison
///
/// Values are computed from the raw data on every call, so both methods can
/// fail.
pub trait Experimental {
    /// Deposits the values refer to, in order
    fn deposit_ids(&self) -> Result<Vec<String>>;

    /// Values by key, in order
    fn values(&self) -> Result<Vec<(String, Quantity)>>;
}

impl Experimental for SpectralIndex<'_> {
    fn deposit_ids(&self) -> Result<Vec<String>> {
        Ok(SpectralIndex::deposit_ids(self).to_vec())
    }

    fn values(&self) -> Result<Vec<(String, Quantity)>> {
        Ok(vec![(SPECTRAL_INDEX_KEY.to_string(), self.value()?)])
    }
}

impl Experimental for Traverse<'_> {
    fn deposit_ids(&self) -> Result<Vec<String>> {
        Ok(Traverse::deposit_ids(self)?)
    }

    fn values(&self) -> Result<Vec<(String, Quantity)>> {
        Ok(Traverse::values(self)?)
    }
}
