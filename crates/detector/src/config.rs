//! Tunable constants of the reduction rules

use serde::{Deserialize, Serialize};

/// Ratio of the first calibration channel to the half-maximum channel
///
/// Effective mass tables start at 15% of the channel where the calibration
/// spectrum reached half of its maximum, so dividing the first tabulated
/// channel by this factor recovers the discrimination channel.
pub const DISCRIMINATION_SCALE: f64 = 0.15;

/// Width of the trailing moving average used to find the plateau (samples)
pub const PLATEAU_WINDOW: usize = 9;

/// Plateau threshold as a fraction of the maximum smoothed value
pub const PLATEAU_THRESHOLD_FRACTION: f64 = 0.2;

/// Allowed deviation from unity of the summed composition shares
pub const COMPOSITION_TOLERANCE: f64 = 1.0e-3;

/// Relative difference below which two relative uncertainties are equal
pub const TIE_TOLERANCE: f64 = 1.0e-12;

/// Parameters of the plateau search on a count rate time series
///
/// The series is smoothed with a trailing moving average of `window` samples,
/// and the plateau is the longest run of smoothed values above
/// `threshold_fraction` of the smoothed maximum.
///
/// ```rust
/// # use fctools_detector::PlateauConfig;
/// let config = PlateauConfig {
///     window: 5,
///     ..Default::default()
/// };
/// assert_eq!(config.threshold_fraction, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateauConfig {
    /// Moving average width (samples)
    pub window: usize,
    /// Fraction of the smoothed maximum a sample must exceed
    pub threshold_fraction: f64,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            window: PLATEAU_WINDOW,
            threshold_fraction: PLATEAU_THRESHOLD_FRACTION,
        }
    }
}
