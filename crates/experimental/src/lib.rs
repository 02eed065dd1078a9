//! Experimental quantities from fission chamber measurements
//!
//! Builds on the raw data types of `fctools-detector`:
//!
//! | Type                                  | Value                                         |
//! | ------------------------------------- | --------------------------------------------- |
//! | [NormalizedFissionFragmentSpectrum]   | fission rate per unit effective mass and power |
//! | [SpectralIndex]                       | ratio of two normalised rates at one location |
//! | [Traverse]                            | rates of one deposit across locations         |
//!
//! All of these borrow the detector data they were built from, and nothing is
//! cached. Calling `value()` always recomputes from the raw data.
//!
//! ```rust
//! # use fctools_detector::{RateIdentity, ReactionRate, Sample};
//! # use fctools_experimental::Traverse;
//! # use chrono::{NaiveDate, TimeDelta};
//! # let t0 = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap().and_hms_opt(13, 19, 20).unwrap();
//! # let detector = |id: &str, value: f64| {
//! #     let samples = (0..10)
//! #         .map(|i| Sample::new(t0 + TimeDelta::seconds(i), value))
//! #         .collect();
//! #     let identity = RateIdentity::new("A", "B", id).with_deposit("U235");
//! #     ReactionRate::new(identity, t0, samples).unwrap().with_life_time(10.0).unwrap()
//! # };
//! let centre = detector("1", 100.0);
//! let edge = detector("2", 25.0);
//!
//! let traverse = Traverse::new([("centre", &centre), ("edge", &edge)]).unwrap();
//! let profile = traverse.normalised_to("centre").unwrap();
//!
//! assert_eq!(profile[1].0, "edge");
//! assert_eq!(profile[1].1.value(), 0.25);
//! assert_eq!(traverse.deposit_ids().unwrap(), vec!["U235"]);
//! ```

mod error;
mod normalized;
mod spectral_index;
mod traverse;

#[doc(inline)]
pub use normalized::NormalizedFissionFragmentSpectrum;

#[doc(inline)]
pub use spectral_index::SpectralIndex;

#[doc(inline)]
pub use traverse::{Traverse, TraverseMember};

#[doc(inline)]
pub use error::{Error, Result};
