//! Module for effective mass calibrations of fission chamber deposits

// internal modules
use crate::config::{COMPOSITION_TOLERANCE, DISCRIMINATION_SCALE};
use crate::error::{Error, Result};
use crate::reaction_rate::check_id;

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One row of a calibrated effective mass table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Discrimination channel of the row
    pub channel: f64,
    /// Effective mass for counts above the channel
    pub value: f64,
    /// Absolute uncertainty on the effective mass
    pub uncertainty: f64,
}

impl CalibrationPoint {
    /// Convenience constructor
    pub const fn new(channel: f64, value: f64, uncertainty: f64) -> Self {
        Self {
            channel,
            value,
            uncertainty,
        }
    }

    /// Effective mass of the row as a [Quantity]
    pub fn quantity(&self) -> Result<Quantity> {
        Ok(Quantity::new(self.value, self.uncertainty)?)
    }
}

/// Share of one nuclide in a deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Nuclide name, e.g. "U235"
    pub nuclide: String,
    /// Atomic fraction of the deposit
    pub share: f64,
    /// Absolute uncertainty on the fraction
    pub uncertainty: f64,
}

impl Composition {
    /// Share of the nuclide as a [Quantity]
    pub fn quantity(&self) -> Result<Quantity> {
        Ok(Quantity::new(self.share, self.uncertainty)?)
    }
}

/// Calibrated effective mass of a deposit in a given detector
///
/// The integral table gives the effective mass as a function of the
/// discrimination channel, and is only valid for spectra with the same number
/// of `bins` as the calibration.
///
/// ```rust
/// # use fctools_detector::{CalibrationPoint, EffectiveMass};
/// let integral = (6..=24)
///     .map(|c| CalibrationPoint::new(c as f64, 60.0, 0.1))
///     .collect();
///
/// let em = EffectiveMass::new("D1", "C1", integral, 42).unwrap();
///
/// // first row at 15% of the half maximum channel
/// assert_eq!(em.discrimination_channel(), 40);
/// assert_eq!(em.composition()[0].nuclide, "D1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveMass {
    deposit_id: String,
    detector_id: String,
    integral: Vec<CalibrationPoint>,
    bins: u32,
    composition: Option<Vec<Composition>>,
}

impl EffectiveMass {
    /// Validate and build a new calibration
    pub fn new(
        deposit_id: impl Into<String>,
        detector_id: impl Into<String>,
        integral: Vec<CalibrationPoint>,
        bins: u32,
    ) -> Result<Self> {
        let deposit_id = deposit_id.into();
        let detector_id = detector_id.into();
        check_id("deposit_id", &deposit_id)?;
        check_id("detector_id", &detector_id)?;

        if bins == 0 {
            return Err(Error::Validation(f!(
                "calibration of {deposit_id} in {detector_id} has zero bins"
            )));
        }

        if integral.is_empty() {
            return Err(Error::Validation(f!(
                "calibration of {deposit_id} in {detector_id} has no rows"
            )));
        }

        if let Some(p) = integral.iter().find(|p| {
            !p.channel.is_finite() || p.channel < 0.0 || Quantity::new(p.value, p.uncertainty).is_err()
        }) {
            return Err(Error::Validation(f!(
                "calibration of {deposit_id} in {detector_id} has an invalid row {p:?}"
            )));
        }

        if integral.iter().tuple_windows().any(|(a, b)| b.channel < a.channel) {
            return Err(Error::Validation(f!(
                "calibration of {deposit_id} in {detector_id} has unsorted channels"
            )));
        }

        Ok(Self {
            deposit_id,
            detector_id,
            integral,
            bins,
            composition: None,
        })
    }

    /// Attach the nuclide composition of the deposit
    ///
    /// Shares that do not add up to one are accepted with a warning.
    pub fn with_composition(mut self, composition: Vec<Composition>) -> Result<Self> {
        if let Some(c) = composition.iter().find(|c| {
            c.nuclide.trim().is_empty() || Quantity::new(c.share, c.uncertainty).is_err()
        }) {
            return Err(Error::Validation(f!(
                "composition of {} has an invalid row {c:?}",
                self.deposit_id
            )));
        }

        let total = composition.iter().map(|c| c.share).sum::<f64>();
        if (total - 1.0).abs() > COMPOSITION_TOLERANCE {
            warn!(
                "Composition of {} sums to {total} instead of 1",
                self.deposit_id
            );
        }

        self.composition = Some(composition);
        Ok(self)
    }

    /// Deposit identifier
    pub fn deposit_id(&self) -> &str {
        &self.deposit_id
    }

    /// Detector identifier
    pub fn detector_id(&self) -> &str {
        &self.detector_id
    }

    /// Calibration table in order
    pub fn integral(&self) -> &[CalibrationPoint] {
        &self.integral
    }

    /// Number of channels the calibration is valid for
    pub fn bins(&self) -> u32 {
        self.bins
    }

    /// Nuclide composition of the deposit
    ///
    /// A deposit without a tabulated composition is taken to be made entirely
    /// of the nuclide it is named after.
    pub fn composition(&self) -> Vec<Composition> {
        self.composition.clone().unwrap_or_else(|| {
            vec![Composition {
                nuclide: self.deposit_id.clone(),
                share: 1.0,
                uncertainty: 0.0,
            }]
        })
    }

    /// Share of a nuclide in the deposit
    pub fn share(&self, nuclide: &str) -> Result<Quantity> {
        self.composition()
            .iter()
            .find(|c| c.nuclide == nuclide)
            .ok_or_else(|| {
                Error::KeyNotFound(f!("nuclide {nuclide} in deposit {}", self.deposit_id))
            })?
            .quantity()
    }

    /// Channel above which counts are integrated
    ///
    /// The first calibration row sits at a fixed fraction of the half
    /// maximum channel, see [DISCRIMINATION_SCALE].
    pub fn discrimination_channel(&self) -> u32 {
        let channel = (self.first().channel / DISCRIMINATION_SCALE).floor() as u32;
        debug!(
            "Discrimination channel of {} in {}: {channel}",
            self.deposit_id, self.detector_id
        );
        channel
    }

    /// Effective mass at the discrimination channel
    pub fn discrimination_value(&self) -> Result<Quantity> {
        self.first().quantity()
    }

    fn first(&self) -> &CalibrationPoint {
        // construction guarantees at least one row
        &self.integral[0]
    }
}
