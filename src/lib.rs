//! `fctools` is a modular toolkit for reducing fission chamber measurements
//! into calibrated reaction rates, spectral indices, traverses, and C/E
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use fctools_quantity as quantity;

#[doc(inline)]
pub use fctools_utils as utils;

#[cfg(feature = "detector")]
#[cfg_attr(docsrs, doc(cfg(feature = "detector")))]
#[doc(inline)]
pub use fctools_detector as detector;

#[cfg(feature = "experimental")]
#[cfg_attr(docsrs, doc(cfg(feature = "experimental")))]
#[doc(inline)]
pub use fctools_experimental as experimental;

#[cfg(feature = "comparison")]
#[cfg_attr(docsrs, doc(cfg(feature = "comparison")))]
#[doc(inline)]
pub use fctools_comparison as comparison;
