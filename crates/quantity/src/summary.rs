use crate::quantity::Quantity;

use fctools_utils::{OptionExt, ValueExt};

use serde::{Deserialize, Serialize};

/// Flat tabular view of a [Quantity] for reporting layers
///
/// Serialises with the column names commonly used in measurement reports,
/// `value`, `uncertainty`, and `uncertainty [%]`.
///
/// ```rust
/// # use fctools_quantity::Quantity;
/// let summary = Quantity::new(200.0, 5.0).unwrap().summary();
/// assert_eq!(summary.uncertainty_percent, Some(2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Central value
    pub value: f64,
    /// Absolute uncertainty
    pub uncertainty: f64,
    /// Relative uncertainty (%), undefined for a zero value
    #[serde(rename = "uncertainty [%]")]
    pub uncertainty_percent: Option<f64>,
}

impl From<Quantity> for Summary {
    fn from(quantity: Quantity) -> Self {
        Self {
            value: quantity.value(),
            uncertainty: quantity.uncertainty(),
            uncertainty_percent: quantity.relative_uncertainty_percent(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:>13}{:>13}{:>10}",
            self.value.sci(5, 2),
            self.uncertainty.sci(5, 2),
            self.uncertainty_percent.map(|p| p.percent(3)).display()
        )
    }
}
