//! Calculated over experimental (C/E) comparisons
//!
//! Transport calculations are run elsewhere. Their results enter here as
//! [CalculatedSpectralIndex] and [CalculatedTraverse] values tagged with the
//! monitor and deposits they were normalised to.
//!
//! A [CoverE] pairs one calculated reference with the experimental quantity
//! for the same deposits, through the [Calculated] and [Experimental] traits.
//!
//! ```rust
//! # use fctools_detector::{RateIdentity, ReactionRate, Sample};
//! # use fctools_experimental::Traverse;
//! # use fctools_comparison::{CalculatedTraverse, CoverE};
//! # use fctools_quantity::Quantity;
//! # use chrono::{NaiveDate, TimeDelta};
//! # let t0 = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap().and_hms_opt(13, 19, 20).unwrap();
//! # let detector = |value: f64| {
//! #     let samples = (0..10)
//! #         .map(|i| Sample::new(t0 + TimeDelta::seconds(i), value))
//! #         .collect();
//! #     let identity = RateIdentity::new("A", "B", "1").with_deposit("dep");
//! #     ReactionRate::new(identity, t0, samples).unwrap().with_life_time(10.0).unwrap()
//! # };
//! let (a, b) = (detector(100.0), detector(50.0));
//! let experimental = Traverse::new([("loc A", &a), ("loc B", &b)]).unwrap();
//!
//! let calculated = CalculatedTraverse::new(
//!     [
//!         ("loc A", Quantity::new(101.0, 1.0).unwrap()),
//!         ("loc B", Quantity::new(50.0, 1.0).unwrap()),
//!     ],
//!     "M",
//!     "dep",
//! )
//! .unwrap();
//!
//! let ce = CoverE::new(&calculated, &experimental).unwrap();
//! assert_eq!(ce.deposit_ids(), ["dep"]);
//!
//! let rows = ce.comparisons().unwrap();
//! assert_eq!(rows[1].ratio.value(), 1.0);
//! ```
//!
//! Many comparisons can be evaluated together with [compare_batch], and
//! [summary_table] lays out the rows for a report.

mod calculated;
mod cover_e;
mod error;
mod experimental;

#[doc(inline)]
pub use calculated::{Calculated, CalculatedSpectralIndex, CalculatedTraverse, SPECTRAL_INDEX_KEY};

#[doc(inline)]
pub use experimental::Experimental;

#[doc(inline)]
pub use cover_e::{compare_batch, summary_table, Comparison, CoverE};

#[doc(inline)]
pub use error::{Error, Result};
