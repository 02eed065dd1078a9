//! Module for count rate time series and their plateau

// internal modules
use crate::config::PlateauConfig;
use crate::error::{Error, Result};

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::{f, OptionExt, SliceExt};

// external crates
use chrono::{NaiveDateTime, TimeDelta};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// standard library
use std::ops::Range;

/// Identity shared by every detector time series
///
/// The `deposit_id` is optional because a pure power monitor does not need
/// one. Uses that do need it ask through [ReactionRate::deposit_id()], which
/// fails for a monitor without a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateIdentity {
    /// Measurement campaign
    pub campaign_id: String,
    /// Experiment within the campaign
    pub experiment_id: String,
    /// Detector that recorded the series
    pub detector_id: String,
    /// Fissile deposit inside the detector, if any
    pub deposit_id: Option<String>,
}

impl RateIdentity {
    /// Identity of a detector without a deposit, e.g. a power monitor
    pub fn new(
        campaign_id: impl Into<String>,
        experiment_id: impl Into<String>,
        detector_id: impl Into<String>,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            experiment_id: experiment_id.into(),
            detector_id: detector_id.into(),
            deposit_id: None,
        }
    }

    /// Attach the deposit of the detector
    pub fn with_deposit(mut self, deposit_id: impl Into<String>) -> Self {
        self.deposit_id = Some(deposit_id.into());
        self
    }
}

impl std::fmt::Display for RateIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}/{} detector {} (deposit {})",
            self.campaign_id,
            self.experiment_id,
            self.detector_id,
            self.deposit_id.as_ref().display()
        )
    }
}

/// One time-tagged acquisition
///
/// Each sample holds the counts accumulated up to its timestamp, so a sample
/// belongs to the interval that ends at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Acquisition timestamp
    #[serde(rename = "Time")]
    pub time: NaiveDateTime,
    /// Counts recorded
    pub value: f64,
}

impl Sample {
    /// Convenience constructor
    pub const fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// Count rate time series for a single detector
///
/// Constructed once from tabulated data and immutable afterwards. Everything
/// derived from the series, such as the [Plateau], is computed on request from
/// the untouched samples.
///
/// ```rust
/// # use fctools_detector::{RateIdentity, ReactionRate, Sample};
/// # use chrono::{NaiveDate, TimeDelta};
/// let start = NaiveDate::from_ymd_opt(2024, 5, 19)
///     .unwrap()
///     .and_hms_opt(11, 19, 20)
///     .unwrap();
///
/// let samples = [0.0, 10.0, 15.0, 10.0, 20.0, 15.0, 10.0]
///     .iter()
///     .enumerate()
///     .map(|(i, v)| Sample::new(start + TimeDelta::seconds(i as i64), *v))
///     .collect();
///
/// let identity = RateIdentity::new("C1", "E1", "M");
/// let monitor = ReactionRate::new(identity, start, samples).unwrap();
///
/// // 80 counts over seven 1 s intervals
/// let rate = monitor.rate().unwrap();
/// assert_eq!(rate.value(), 80.0 / 7.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRate {
    identity: RateIdentity,
    start_time: NaiveDateTime,
    life_time: Option<f64>,
    real_time: Option<f64>,
    samples: Vec<Sample>,
}

impl ReactionRate {
    /// Validate and build a new time series
    ///
    /// Fails when an identifier is blank, the series is empty, a value is
    /// negative or not finite, or the timestamps decrease. Repeated
    /// timestamps are kept as separate samples.
    pub fn new(identity: RateIdentity, start_time: NaiveDateTime, samples: Vec<Sample>) -> Result<Self> {
        check_id("campaign_id", &identity.campaign_id)?;
        check_id("experiment_id", &identity.experiment_id)?;
        check_id("detector_id", &identity.detector_id)?;
        if let Some(deposit) = &identity.deposit_id {
            check_id("deposit_id", deposit)?;
        }

        if samples.is_empty() {
            return Err(Error::Validation(f!("{identity} has no samples")));
        }

        if let Some(s) = samples.iter().find(|s| !s.value.is_finite() || s.value < 0.0) {
            return Err(Error::Validation(f!(
                "{identity} has an invalid value {} at {}",
                s.value,
                s.time
            )));
        }

        if let Some((a, b)) = samples.iter().tuple_windows().find(|(a, b)| b.time < a.time) {
            return Err(Error::Validation(f!(
                "{identity} timestamps decrease from {} to {}",
                a.time,
                b.time
            )));
        }

        Ok(Self {
            identity,
            start_time,
            life_time: None,
            real_time: None,
            samples,
        })
    }

    /// Attach the acquisition live time (s)
    pub fn with_life_time(mut self, seconds: f64) -> Result<Self> {
        self.life_time = Some(check_time("life_time", seconds)?);
        Ok(self)
    }

    /// Attach the acquisition real time (s)
    pub fn with_real_time(mut self, seconds: f64) -> Result<Self> {
        self.real_time = Some(check_time("real_time", seconds)?);
        Ok(self)
    }

    /// Full identity of the detector
    pub fn identity(&self) -> &RateIdentity {
        &self.identity
    }

    /// Campaign identifier
    pub fn campaign_id(&self) -> &str {
        &self.identity.campaign_id
    }

    /// Experiment identifier
    pub fn experiment_id(&self) -> &str {
        &self.identity.experiment_id
    }

    /// Detector identifier
    pub fn detector_id(&self) -> &str {
        &self.identity.detector_id
    }

    /// Deposit identifier, required wherever the rate stands for a deposit
    pub fn deposit_id(&self) -> Result<&str> {
        self.identity.deposit_id.as_deref().ok_or_else(|| {
            Error::Validation(f!(
                "detector {} has no deposit_id but one is required",
                self.identity.detector_id
            ))
        })
    }

    /// Start of the acquisition
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Acquisition live time (s), if known
    pub fn life_time(&self) -> Option<f64> {
        self.life_time
    }

    /// Acquisition real time (s), if known
    pub fn real_time(&self) -> Option<f64> {
        self.real_time
    }

    /// The untouched time series
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Values of the series in order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Total counts of the series
    pub fn counts(&self) -> f64 {
        self.samples.iter().map(|s| s.value).sum()
    }

    /// Counting time (s) used for the rate
    ///
    /// The live time is preferred, then the real time. Without either, every
    /// sample closes one counting interval, so the time covered is the span
    /// of the timestamps plus the interval closed by the first sample. That
    /// interval is taken as the median spacing of the series.
    pub fn duration(&self) -> Result<f64> {
        if let Some(t) = self.life_time.or(self.real_time) {
            return Ok(t);
        }

        let spacing = self
            .samples
            .iter()
            .tuple_windows()
            .map(|(a, b)| seconds_between(a.time, b.time))
            .collect::<Vec<f64>>()
            .try_median()
            .unwrap_or_default();

        // a series always has samples
        let span = seconds_between(self.samples[0].time, self.samples[self.samples.len() - 1].time);
        let covered = span + spacing;

        if covered > 0.0 {
            Ok(covered)
        } else {
            Err(Error::Validation(f!(
                "{} has no life_time, real_time, or time span to count over",
                self.identity
            )))
        }
    }

    /// Mean count rate with Poisson counting uncertainty, `N/T +/- sqrt(N)/T`
    pub fn rate(&self) -> Result<Quantity> {
        let counts = Quantity::from_counts(self.counts())?;
        Ok(counts.divide(Quantity::exact(self.duration()?)?)?)
    }

    /// Find the in-beam plateau with the default [PlateauConfig]
    pub fn plateau(&self) -> Result<Plateau<'_>> {
        self.plateau_with(&PlateauConfig::default())
    }

    /// Find the in-beam plateau
    ///
    /// The series is smoothed with a trailing moving average and the plateau
    /// is the longest contiguous run of samples whose smoothed value is above
    /// a fraction of the smoothed maximum. Samples before the window is first
    /// filled are never part of a run.
    ///
    /// If nothing qualifies, for example a series of zeros or one shorter
    /// than the window, the full series is returned instead. The plateau is
    /// never empty.
    pub fn plateau_with(&self, config: &PlateauConfig) -> Result<Plateau<'_>> {
        if !config.threshold_fraction.is_finite() || config.threshold_fraction < 0.0 {
            return Err(Error::Validation(f!(
                "plateau threshold fraction must be finite and non-negative, found {}",
                config.threshold_fraction
            )));
        }

        let smooth = self.values().moving_average(config.window)?;
        let offset = config.window - 1;

        let run = smooth
            .try_max()
            .ok()
            .filter(|max| *max > 0.0)
            .and_then(|max| smooth.longest_run_above(config.threshold_fraction * max))
            .map(|r| r.start + offset..r.end + offset);

        let range = match run {
            Some(range) => range,
            None => {
                warn!(
                    "No plateau found for {}, using the full series",
                    self.identity
                );
                0..self.samples.len()
            }
        };

        let plateau = Plateau { rate: self, range };
        debug!(
            "Plateau of {} from {} to {} ({} samples)",
            self.identity,
            plateau.start(),
            plateau.end(),
            plateau.len()
        );
        Ok(plateau)
    }

    /// Mean over the window `(start, start + duration]`
    ///
    /// Each sample closes the interval it was counted over, so the sample at
    /// `start` belongs to the previous interval and is excluded. The
    /// uncertainty is Poisson on the summed counts, `sqrt(N)/n`.
    pub fn average(&self, start: NaiveDateTime, duration: f64) -> Result<Quantity> {
        let end = TimeDelta::try_milliseconds((duration * 1.0e3).round() as i64)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or_else(|| {
                Error::Validation(f!("averaging duration of {duration} s is out of range"))
            })?;

        let window = self
            .samples
            .iter()
            .filter(|s| s.time > start && s.time <= end)
            .map(|s| s.value)
            .collect::<Vec<f64>>();

        if window.is_empty() {
            return Err(Error::EmptyWindow { start, end });
        }

        let n = window.len() as f64;
        let counts = Quantity::from_counts(window.iter().sum())?;
        Ok(Quantity::new(
            counts.value() / n,
            counts.uncertainty() / n,
        )?)
    }

    /// Plateau counts per unit of monitor signal
    ///
    /// The counts integrated over the plateau of this series are divided by
    /// the mean monitor signal over the same time window. Both series must
    /// belong to the same campaign and experiment.
    ///
    /// The monitor window opens at the first plateau sample and closes at the
    /// last, so a plateau of a single sample, or of samples sharing one
    /// timestamp, is rejected.
    pub fn per_unit_power(&self, monitor: &ReactionRate) -> Result<Quantity> {
        self.per_unit_power_with(monitor, &PlateauConfig::default())
    }

    /// Same as [ReactionRate::per_unit_power()] with an explicit plateau search
    pub fn per_unit_power_with(&self, monitor: &ReactionRate, config: &PlateauConfig) -> Result<Quantity> {
        if self.campaign_id() != monitor.campaign_id()
            || self.experiment_id() != monitor.experiment_id()
        {
            return Err(Error::MismatchedIdentity(f!(
                "{} cannot be normalised by monitor {}",
                self.identity,
                monitor.identity
            )));
        }

        let plateau = self.plateau_with(config)?;
        if plateau.duration() <= 0.0 {
            return Err(Error::Validation(f!(
                "plateau of {} spans no time, so the monitor cannot be averaged over it",
                self.identity
            )));
        }

        let integral = plateau.integral()?;
        let power = monitor.average(plateau.start(), plateau.duration())?;
        debug!("Plateau integral {integral}, monitor average {power}");

        Ok(integral.divide(power)?)
    }
}

/// Contiguous in-beam part of a [ReactionRate]
///
/// Borrows the samples of the series it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Plateau<'a> {
    rate: &'a ReactionRate,
    range: Range<usize>,
}

impl<'a> Plateau<'a> {
    /// Samples on the plateau
    pub fn samples(&self) -> &'a [Sample] {
        &self.rate.samples[self.range.clone()]
    }

    /// Index range of the plateau within the full series
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Number of samples on the plateau
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Always false, a plateau has at least one sample
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Timestamp of the first plateau sample
    pub fn start(&self) -> NaiveDateTime {
        self.rate.samples[self.range.start].time
    }

    /// Timestamp of the last plateau sample
    pub fn end(&self) -> NaiveDateTime {
        self.rate.samples[self.range.end - 1].time
    }

    /// Time between the first and last plateau samples (s)
    pub fn duration(&self) -> f64 {
        seconds_between(self.start(), self.end())
    }

    /// Summed plateau counts with Poisson uncertainty
    pub fn integral(&self) -> Result<Quantity> {
        Ok(Quantity::from_counts(
            self.samples().iter().map(|s| s.value).sum(),
        )?)
    }

    /// Mean plateau value with the standard error of the mean
    ///
    /// A single-sample plateau has no spread to estimate from, so Poisson
    /// statistics are used instead.
    pub fn mean(&self) -> Result<Quantity> {
        let values = self.samples().iter().map(|s| s.value).collect::<Vec<f64>>();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        if values.len() < 2 {
            return Ok(Quantity::from_counts(mean)?);
        }

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Ok(Quantity::new(mean, (variance / n).sqrt())?)
    }
}

/// Seconds elapsed from `a` to `b`
pub(crate) fn seconds_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (b - a).num_milliseconds() as f64 / 1.0e3
}

pub(crate) fn check_id(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(f!("{name} must not be blank")));
    }
    Ok(())
}

pub(crate) fn check_time(name: &str, seconds: f64) -> Result<f64> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(Error::Validation(f!(
            "{name} must be a positive number of seconds, found {seconds}"
        )));
    }
    Ok(seconds)
}
