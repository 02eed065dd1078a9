//! Module for fission fragment pulse height spectra

// internal modules
use crate::error::{Error, Result};
use crate::reaction_rate::{check_id, check_time};

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use chrono::NaiveDateTime;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Identity of a single spectrum acquisition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrumIdentity {
    /// Measurement campaign
    pub campaign_id: String,
    /// Experiment within the campaign
    pub experiment_id: String,
    /// Detector that recorded the spectrum
    pub detector_id: String,
    /// Fissile deposit inside the detector
    pub deposit_id: String,
    /// Position of the detector during the acquisition
    pub location_id: String,
    /// Acquisition label
    pub measurement_id: String,
}

impl std::fmt::Display for SpectrumIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}/{} {} detector {} deposit {} at {}",
            self.campaign_id,
            self.experiment_id,
            self.measurement_id,
            self.detector_id,
            self.deposit_id,
            self.location_id
        )
    }
}

/// Counts recorded in one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelCount {
    /// Channel number, starting from 1
    pub channel: u32,
    /// Counts in the channel
    #[serde(rename = "counts")]
    pub count: f64,
}

impl ChannelCount {
    /// Convenience constructor
    pub const fn new(channel: u32, count: f64) -> Self {
        Self { channel, count }
    }
}

/// Pulse height spectrum of one fission chamber acquisition
///
/// ```rust
/// # use fctools_detector::{ChannelCount, FissionFragmentSpectrum, SpectrumIdentity};
/// # use chrono::NaiveDate;
/// # let identity = SpectrumIdentity {
/// #     campaign_id: "A".into(),
/// #     experiment_id: "B".into(),
/// #     detector_id: "C1".into(),
/// #     deposit_id: "D1".into(),
/// #     location_id: "E".into(),
/// #     measurement_id: "F".into(),
/// # };
/// # let start = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap().and_hms_opt(20, 30, 15).unwrap();
/// let channels = (1..=4)
///     .zip([5.0, 10.0, 4.0, 0.0])
///     .map(|(c, n)| ChannelCount::new(c, n))
///     .collect();
///
/// let ffs = FissionFragmentSpectrum::new(identity, start, 10.0, 10.0, channels).unwrap();
///
/// assert_eq!(ffs.integral_above(1).unwrap().value(), 19.0);
/// assert_eq!(ffs.integral_above(3).unwrap().value(), 4.0);
/// assert_eq!(ffs.integral_above(5).unwrap().value(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FissionFragmentSpectrum {
    identity: SpectrumIdentity,
    start_time: NaiveDateTime,
    life_time: f64,
    real_time: f64,
    channels: Vec<ChannelCount>,
}

impl FissionFragmentSpectrum {
    /// Validate and build a new spectrum
    pub fn new(
        identity: SpectrumIdentity,
        start_time: NaiveDateTime,
        life_time: f64,
        real_time: f64,
        channels: Vec<ChannelCount>,
    ) -> Result<Self> {
        check_id("campaign_id", &identity.campaign_id)?;
        check_id("experiment_id", &identity.experiment_id)?;
        check_id("detector_id", &identity.detector_id)?;
        check_id("deposit_id", &identity.deposit_id)?;
        check_id("location_id", &identity.location_id)?;
        check_id("measurement_id", &identity.measurement_id)?;
        check_time("life_time", life_time)?;
        check_time("real_time", real_time)?;

        if channels.is_empty() {
            return Err(Error::Validation(f!("{identity} has no channels")));
        }

        if let Some(c) = channels.iter().find(|c| !c.count.is_finite() || c.count < 0.0) {
            return Err(Error::Validation(f!(
                "{identity} has invalid counts {} in channel {}",
                c.count,
                c.channel
            )));
        }

        if let Some((a, b)) = channels
            .iter()
            .tuple_windows()
            .find(|(a, b)| b.channel <= a.channel)
        {
            return Err(Error::Validation(f!(
                "{identity} channels are not increasing ({} then {})",
                a.channel,
                b.channel
            )));
        }

        if life_time > real_time {
            warn!("{identity} life time {life_time} s exceeds real time {real_time} s");
        }

        Ok(Self {
            identity,
            start_time,
            life_time,
            real_time,
            channels,
        })
    }

    /// Full identity of the acquisition
    pub fn identity(&self) -> &SpectrumIdentity {
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

    /// Deposit identifier
    pub fn deposit_id(&self) -> &str {
        &self.identity.deposit_id
    }

    /// Location identifier
    pub fn location_id(&self) -> &str {
        &self.identity.location_id
    }

    /// Measurement identifier
    pub fn measurement_id(&self) -> &str {
        &self.identity.measurement_id
    }

    /// Start of the acquisition
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Acquisition live time (s)
    pub fn life_time(&self) -> f64 {
        self.life_time
    }

    /// Acquisition real time (s)
    pub fn real_time(&self) -> f64 {
        self.real_time
    }

    /// Counting time used for normalisation, the live time (s)
    pub fn time(&self) -> f64 {
        self.life_time
    }

    /// Fraction of the real time the acquisition was busy
    pub fn dead_time(&self) -> f64 {
        1.0 - self.life_time / self.real_time
    }

    /// Channel data in order
    pub fn channels(&self) -> &[ChannelCount] {
        &self.channels
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false, a spectrum has at least one channel
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Total counts in channels at or above `channel`, `N +/- sqrt(N)`
    ///
    /// A channel beyond the last one gives zero counts. Fails if the sum
    /// overflows.
    pub fn integral_above(&self, channel: u32) -> Result<Quantity> {
        let counts = self
            .channels
            .iter()
            .filter(|c| c.channel >= channel)
            .map(|c| c.count)
            .sum::<f64>();

        debug!("{} integral above channel {channel}: {counts}", self.identity);

        if !counts.is_finite() {
            return Err(Error::Validation(f!(
                "{} integral above channel {channel} overflows",
                self.identity
            )));
        }

        Ok(Quantity::from_counts(counts)?)
    }

    /// Channel with the most counts, the first one on ties
    pub fn max_channel(&self) -> u32 {
        self.channels
            .iter()
            .rev()
            .max_by(|a, b| a.count.total_cmp(&b.count))
            .map(|c| c.channel)
            .unwrap_or_default()
    }

    /// Merge adjacent channels into a spectrum of `bins` channels
    ///
    /// The number of channels must be a multiple of `bins`. Merged channels
    /// are renumbered from the first channel of the original spectrum.
    ///
    /// ```rust
    /// # use fctools_detector::{ChannelCount, FissionFragmentSpectrum, SpectrumIdentity};
    /// # use chrono::NaiveDate;
    /// # let identity = SpectrumIdentity {
    /// #     campaign_id: "A".into(),
    /// #     experiment_id: "B".into(),
    /// #     detector_id: "C1".into(),
    /// #     deposit_id: "D1".into(),
    /// #     location_id: "E".into(),
    /// #     measurement_id: "F".into(),
    /// # };
    /// # let start = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap().and_hms_opt(20, 30, 15).unwrap();
    /// let channels = (1..=4).map(|c| ChannelCount::new(c, c as f64)).collect();
    /// let ffs = FissionFragmentSpectrum::new(identity, start, 10.0, 10.0, channels).unwrap();
    ///
    /// let merged = ffs.rebin(2).unwrap();
    /// assert_eq!(merged.channels()[0], ChannelCount::new(1, 3.0));
    /// assert_eq!(merged.channels()[1], ChannelCount::new(2, 7.0));
    ///
    /// assert!(ffs.rebin(3).is_err());
    /// ```
    pub fn rebin(&self, bins: u32) -> Result<Self> {
        let n = self.channels.len();
        if bins == 0 || n % bins as usize != 0 {
            return Err(Error::Validation(f!(
                "{} channels of {} cannot be merged into {bins} bins",
                n,
                self.identity
            )));
        }

        let width = n / bins as usize;
        let first = self.channels[0].channel;
        debug!(
            "Merging {n} channels of {} into {bins} bins of {width}",
            self.identity
        );

        let channels = self
            .channels
            .chunks(width)
            .zip(first..)
            .map(|(chunk, channel)| ChannelCount {
                channel,
                count: chunk.iter().map(|c| c.count).sum(),
            })
            .collect();

        Ok(Self {
            channels,
            ..self.clone()
        })
    }
}
