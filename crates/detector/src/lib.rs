//! Raw fission chamber data and its first reduction steps
//!
//! Three kinds of raw data come out of a fission chamber experiment:
//!
//! - [ReactionRate] count rate time series, from both the chambers and the
//!   reactor power monitors
//! - [FissionFragmentSpectrum] pulse height spectra
//! - [EffectiveMass] calibrations of each deposit in each detector
//!
//! Every type validates on construction and is immutable afterwards, so any
//! derived value is a pure function of the raw data.
//!
//! ## Power normalisation
//!
//! A count rate series is normalised to the reactor power by integrating its
//! in-beam [Plateau] and dividing by the mean monitor signal over the same
//! time window.
//!
//! ```rust
//! # use fctools_detector::{RateIdentity, ReactionRate, Sample};
//! # use chrono::{NaiveDate, TimeDelta};
//! let start = NaiveDate::from_ymd_opt(2024, 5, 27)
//!     .unwrap()
//!     .and_hms_opt(13, 19, 20)
//!     .unwrap();
//!
//! let series = |id: &str, on: f64, off: f64| {
//!     let samples = (0..60)
//!         .map(|i| {
//!             let value = if (20..40).contains(&i) { on } else { off };
//!             Sample::new(start + TimeDelta::seconds(i), value)
//!         })
//!         .collect();
//!     ReactionRate::new(RateIdentity::new("A", "B", id), start, samples).unwrap()
//! };
//!
//! let chamber = series("FC1", 400.0, 0.0);
//! let monitor = series("PM1", 100.0, 0.0);
//!
//! let normalised = chamber.per_unit_power(&monitor).unwrap();
//! assert!(normalised.value() > 0.0);
//! ```
//!
//! Tunable parts of the reduction are named constants in this crate, with the
//! plateau search collected into a [PlateauConfig].

mod config;
mod effective_mass;
mod error;
mod rate_set;
mod reaction_rate;
mod spectrum;

pub mod tabular;

#[doc(inline)]
pub use reaction_rate::{Plateau, RateIdentity, ReactionRate, Sample};

#[doc(inline)]
pub use rate_set::ReactionRateSet;

#[doc(inline)]
pub use spectrum::{ChannelCount, FissionFragmentSpectrum, SpectrumIdentity};

#[doc(inline)]
pub use effective_mass::{CalibrationPoint, Composition, EffectiveMass};

#[doc(inline)]
pub use config::{
    PlateauConfig, COMPOSITION_TOLERANCE, DISCRIMINATION_SCALE, PLATEAU_THRESHOLD_FRACTION,
    PLATEAU_WINDOW, TIE_TOLERANCE,
};

#[doc(inline)]
pub use error::{Error, Result};
