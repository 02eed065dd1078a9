//! Module for values supplied by transport calculations

// internal modules
use crate::error::{Error, Result};

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use serde::Serialize;

/// Key of the single value of a spectral index
pub const SPECTRAL_INDEX_KEY: &str = "value";

/// Calculated spectral index of two deposits
///
/// ```rust
/// # use fctools_comparison::CalculatedSpectralIndex;
/// # use fctools_quantity::Quantity;
/// let value = Quantity::new(1.01, 0.05).unwrap();
///
/// assert!(CalculatedSpectralIndex::new(value, "M", ["D1", "D2"]).is_ok());
/// assert!(CalculatedSpectralIndex::new(value, "M", ["D1"]).is_err());
/// assert!(CalculatedSpectralIndex::new(value, "", ["D1", "D2"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedSpectralIndex {
    value: Quantity,
    monitor_id: String,
    deposit_ids: Vec<String>,
}

impl CalculatedSpectralIndex {
    /// Tag a calculated value with its monitor and `[numerator, denominator]`
    pub fn new<S: Into<String>>(
        value: Quantity,
        monitor_id: impl Into<String>,
        deposit_ids: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let monitor_id = monitor_id.into();
        let deposit_ids = deposit_ids.into_iter().map(Into::into).collect::<Vec<String>>();

        if deposit_ids.len() != 2 {
            return Err(Error::Validation(f!(
                "a spectral index needs two deposits, found {deposit_ids:?}"
            )));
        }

        check_id("monitor_id", &monitor_id)?;
        for deposit in &deposit_ids {
            check_id("deposit_id", deposit)?;
        }

        Ok(Self {
            value,
            monitor_id,
            deposit_ids,
        })
    }

    /// Calculated value
    pub fn value(&self) -> Quantity {
        self.value
    }

    /// Monitor the calculation is normalised to
    pub fn monitor_id(&self) -> &str {
        &self.monitor_id
    }

    /// Deposits as `[numerator, denominator]`
    pub fn deposit_ids(&self) -> &[String] {
        &self.deposit_ids
    }
}

/// Calculated rates of one deposit across locations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedTraverse {
    values: Vec<(String, Quantity)>,
    monitor_id: String,
    deposit_id: String,
}

impl CalculatedTraverse {
    /// Tag calculated values by location, with their monitor and deposit
    ///
    /// Locations must be unique and not blank, and the traverse must not be
    /// empty. The monitor and deposit must not be blank either.
    pub fn new<L: Into<String>>(
        values: impl IntoIterator<Item = (L, Quantity)>,
        monitor_id: impl Into<String>,
        deposit_id: impl Into<String>,
    ) -> Result<Self> {
        let monitor_id = monitor_id.into();
        let deposit_id = deposit_id.into();
        check_id("monitor_id", &monitor_id)?;
        check_id("deposit_id", &deposit_id)?;

        let mut collected: Vec<(String, Quantity)> = Vec::new();
        for (location, value) in values {
            let location = location.into();
            check_id("location", &location)?;
            if collected.iter().any(|(l, _)| *l == location) {
                return Err(Error::Validation(f!(
                    "calculated traverse location '{location}' is repeated"
                )));
            }
            collected.push((location, value));
        }

        if collected.is_empty() {
            return Err(Error::Validation(f!("a calculated traverse needs values")));
        }

        Ok(Self {
            values: collected,
            monitor_id,
            deposit_id,
        })
    }

    /// Values by location, in order
    pub fn values(&self) -> &[(String, Quantity)] {
        &self.values
    }

    /// Value at a location
    pub fn get(&self, location: &str) -> Option<Quantity> {
        self.values
            .iter()
            .find(|(l, _)| l == location)
            .map(|(_, q)| *q)
    }

    /// Monitor the calculation is normalised to
    pub fn monitor_id(&self) -> &str {
        &self.monitor_id
    }

    /// Deposit of the traverse
    pub fn deposit_id(&self) -> &str {
        &self.deposit_id
    }
}

fn check_id(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(f!("calculated {name} must not be blank")));
    }
    Ok(())
}

/// Calculated side of a C/E comparison
pub trait Calculated {
    /// Deposits the values refer to, in order
    fn deposit_ids(&self) -> Vec<String>;

    /// Monitor the calculation is normalised to
    fn monitor_id(&self) -> &str;

    /// Values by key, in order
    fn values(&self) -> Vec<(String, Quantity)>;
}

impl Calculated for CalculatedSpectralIndex {
    fn deposit_ids(&self) -> Vec<String> {
        CalculatedSpectralIndex::deposit_ids(self).to_vec()
    }

    fn monitor_id(&self) -> &str {
        CalculatedSpectralIndex::monitor_id(self)
    }

    fn values(&self) -> Vec<(String, Quantity)> {
        vec![(SPECTRAL_INDEX_KEY.to_string(), self.value)]
    }
}

impl Calculated for CalculatedTraverse {
    fn deposit_ids(&self) -> Vec<String> {
        vec![self.deposit_id.clone()]
    }

    fn monitor_id(&self) -> &str {
        CalculatedTraverse::monitor_id(self)
    }

    fn values(&self) -> Vec<(String, Quantity)> {
        self.values.clone()
    }
}
