use crate::error::{Error, Result};

use std::ops::Range;

/// Extends functionality for slices of float arrays
pub trait SliceExt {
    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use fctools_utils::SliceExt;
    /// # use fctools_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::MAX, 2.2].try_max(), Ok(f64::MAX));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<f64>;

    /// Find the median of float arrays
    ///
    /// Same error cases as [SliceExt::try_max()]. An even number of values
    /// gives the mean of the two central values.
    ///
    /// ```rust
    /// # use fctools_utils::SliceExt;
    /// # use fctools_utils::Error;
    /// assert_eq!([3.0, 1.0, 2.0].try_median(), Ok(2.0));
    /// assert_eq!([4.0, 1.0, 2.0, 3.0].try_median(), Ok(2.5));
    /// assert_eq!(Vec::<f64>::new().try_median(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_median(&self) -> Result<f64>;

    /// Trailing moving average over `width` consecutive values
    ///
    /// Only complete windows are averaged, so the result has
    /// `len - width + 1` values and element `k` is the mean of
    /// `self[k..k + width]`, i.e. it belongs to the sample at `k + width - 1`.
    ///
    /// A slice shorter than the window gives an empty result.
    ///
    /// ```rust
    /// # use fctools_utils::SliceExt;
    /// let values = [1.0, 2.0, 3.0, 4.0];
    /// assert_eq!(values.moving_average(2), Ok(vec![1.5, 2.5, 3.5]));
    /// assert_eq!(values.moving_average(5), Ok(vec![]));
    /// assert!(values.moving_average(0).is_err());
    /// ```
    fn moving_average(&self, width: usize) -> Result<Vec<f64>>;

    /// Longest contiguous run of values strictly above `threshold`
    ///
    /// Returns the index range of the run, or `None` if nothing is above the
    /// threshold. Runs of equal length resolve to the earliest.
    ///
    /// ```rust
    /// # use fctools_utils::SliceExt;
    /// let values = [0.0, 5.0, 5.0, 0.0, 5.0, 5.0, 5.0, 0.0];
    /// assert_eq!(values.longest_run_above(1.0), Some(4..7));
    /// assert_eq!(values.longest_run_above(10.0), None);
    /// ```
    fn longest_run_above(&self, threshold: f64) -> Option<Range<usize>>;
}

impl SliceExt for [f64] {
    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        if let Some(v) = self.iter().max_by(|a, b| a.total_cmp(b)).copied() {
            Ok(v)
        } else {
            Err(Error::SliceContainsNoValues)
        }
    }

    fn try_median(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        if self.is_empty() {
            return Err(Error::SliceContainsNoValues);
        }

        let mut sorted = self.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Ok(0.5 * (sorted[mid - 1] + sorted[mid]))
        } else {
            Ok(sorted[mid])
        }
    }

    fn moving_average(&self, width: usize) -> Result<Vec<f64>> {
        if width == 0 {
            return Err(Error::InvalidWindowWidth { width });
        }

        Ok(self
            .windows(width)
            .map(|w| w.iter().sum::<f64>() / width as f64)
            .collect())
    }

    fn longest_run_above(&self, threshold: f64) -> Option<Range<usize>> {
        let mut best: Option<Range<usize>> = None;
        let mut start: Option<usize> = None;

        // a sentinel closes any run still open at the end of the slice
        for (i, above) in self
            .iter()
            .map(|v| *v > threshold)
            .chain(std::iter::once(false))
            .enumerate()
        {
            match (above, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if best.as_ref().map_or(true, |b| i - s > b.len()) {
                        best = Some(s..i);
                    }
                    start = None;
                }
                _ => (),
            }
        }

        best
    }
}
