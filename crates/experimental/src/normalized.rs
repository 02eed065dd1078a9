//! Module for fission rates per unit mass and power

// internal modules
use crate::error::{Error, Result};

// fctools modules
use fctools_detector::{EffectiveMass, FissionFragmentSpectrum, ReactionRate};
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use log::{debug, trace, warn};

// standard library
use std::borrow::Cow;

/// Fission rate of a deposit per unit effective mass and per unit power
///
/// Combines a pulse height spectrum with the effective mass calibration of the
/// same deposit in the same detector, and the power monitor of the same
/// experiment.
///
/// The spectrum is merged down to the calibration binning if needed, in which
/// case the merged copy is owned and everything else stays borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFissionFragmentSpectrum<'a> {
    spectrum: Cow<'a, FissionFragmentSpectrum>,
    effective_mass: &'a EffectiveMass,
    power_monitor: &'a ReactionRate,
}

impl<'a> NormalizedFissionFragmentSpectrum<'a> {
    /// Check the three inputs belong together
    ///
    /// The spectrum and calibration must share deposit and detector, and the
    /// monitor must come from the same experiment as the spectrum.
    pub fn new(
        spectrum: &'a FissionFragmentSpectrum,
        effective_mass: &'a EffectiveMass,
        power_monitor: &'a ReactionRate,
    ) -> Result<Self> {
        if spectrum.deposit_id() != effective_mass.deposit_id()
            || spectrum.detector_id() != effective_mass.detector_id()
        {
            return Err(Error::MismatchedIdentity(f!(
                "spectrum of {} in {} cannot use the calibration of {} in {}",
                spectrum.deposit_id(),
                spectrum.detector_id(),
                effective_mass.deposit_id(),
                effective_mass.detector_id()
            )));
        }

        if spectrum.experiment_id() != power_monitor.experiment_id() {
            return Err(Error::MismatchedIdentity(f!(
                "spectrum from experiment {} cannot use the monitor of experiment {}",
                spectrum.experiment_id(),
                power_monitor.experiment_id()
            )));
        }

        let spectrum = if spectrum.len() == effective_mass.bins() as usize {
            Cow::Borrowed(spectrum)
        } else {
            warn!(
                "Merging {} channels of {} to the {} bins of its calibration",
                spectrum.len(),
                spectrum.identity(),
                effective_mass.bins()
            );
            Cow::Owned(spectrum.rebin(effective_mass.bins())?)
        };

        Ok(Self {
            spectrum,
            effective_mass,
            power_monitor,
        })
    }

    /// Spectrum at the calibration binning
    pub fn spectrum(&self) -> &FissionFragmentSpectrum {
        &self.spectrum
    }

    /// Calibration of the deposit
    pub fn effective_mass(&self) -> &EffectiveMass {
        self.effective_mass
    }

    /// Monitor the rate is normalised by
    pub fn power_monitor(&self) -> &ReactionRate {
        self.power_monitor
    }

    /// Campaign identifier of the spectrum
    pub fn campaign_id(&self) -> &str {
        self.spectrum.campaign_id()
    }

    /// Experiment identifier
    pub fn experiment_id(&self) -> &str {
        self.spectrum.experiment_id()
    }

    /// Deposit identifier
    pub fn deposit_id(&self) -> &str {
        self.spectrum.deposit_id()
    }

    /// Detector identifier
    pub fn detector_id(&self) -> &str {
        self.spectrum.detector_id()
    }

    /// Location of the measurement
    pub fn location_id(&self) -> &str {
        self.spectrum.location_id()
    }

    /// Measurement identifier
    pub fn measurement_id(&self) -> &str {
        self.spectrum.measurement_id()
    }

    /// Fission rate per unit effective mass and power
    ///
    /// Counts above the discrimination channel, per unit live time, per unit
    /// monitor rate, per unit effective mass. Every step uses the division
    /// rule so the uncertainties of the counts, monitor, and calibration all
    /// contribute.
    pub fn value(&self) -> Result<Quantity> {
        let channel = self.effective_mass.discrimination_channel();
        let counts = self.spectrum.integral_above(channel)?;
        let per_time = counts.divide(Quantity::exact(self.spectrum.time())?)?;
        let per_power = per_time.divide(self.power_monitor.rate()?)?;
        let value = per_power.divide(self.effective_mass.discrimination_value()?)?;

        trace!("Counts above channel {channel}: {counts}");
        debug!(
            "Normalised fission rate of {} in {} at {}: {value}",
            self.deposit_id(),
            self.detector_id(),
            self.location_id()
        );
        Ok(value)
    }
}
