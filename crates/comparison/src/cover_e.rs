//! Module for calculated over experimental ratios

// internal modules
use crate::calculated::Calculated;
use crate::error::{Error, Result};
use crate::experimental::Experimental;

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::{f, OptionExt, ValueExt};

// external crates
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

/// One row of a C/E comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Key shared by both sides, a location or `value`
    pub key: String,
    /// Calculated value
    pub calculated: Quantity,
    /// Experimental value
    pub experimental: Quantity,
    /// Calculated divided by experimental
    pub ratio: Quantity,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.key)?;
        writeln!(f, "  C   {}", self.calculated)?;
        writeln!(f, "  E   {}", self.experimental)?;
        write!(
            f,
            "  C/E {} ({})",
            self.ratio,
            self.ratio
                .relative_uncertainty_percent()
                .map(|p| p.percent(3))
                .display()
        )
    }
}

/// Comparison of a calculated reference to an experimental quantity
///
/// Both sides must refer to the same deposits in the same order. For a
/// spectral index the calculated `[D1, D2]` can only be compared to the
/// experimental `D1/D2`, never `D2/D1`.
#[derive(Debug, Clone)]
pub struct CoverE<'a, C: Calculated, E: Experimental> {
    calculated: &'a C,
    experimental: &'a E,
    deposit_ids: Vec<String>,
}

impl<'a, C: Calculated, E: Experimental> CoverE<'a, C, E> {
    /// Pair the two sides after checking their deposits agree
    pub fn new(calculated: &'a C, experimental: &'a E) -> Result<Self> {
        let deposit_ids = calculated.deposit_ids();
        let experimental_ids = experimental.deposit_ids()?;

        if deposit_ids != experimental_ids {
            return Err(Error::MismatchedIdentity(f!(
                "calculated deposits {deposit_ids:?} do not match experimental {experimental_ids:?}"
            )));
        }

        Ok(Self {
            calculated,
            experimental,
            deposit_ids,
        })
    }

    /// Deposits shared by both sides, in order
    pub fn deposit_ids(&self) -> &[String] {
        &self.deposit_ids
    }

    /// Monitor the calculated side is normalised to
    pub fn monitor_id(&self) -> &str {
        self.calculated.monitor_id()
    }

    /// Calculated side
    pub fn calculated(&self) -> &C {
        self.calculated
    }

    /// Experimental side
    pub fn experimental(&self) -> &E {
        self.experimental
    }

    /// One row per calculated key
    ///
    /// Every calculated key must exist on the experimental side. Experimental
    /// keys without a calculated value are left out.
    pub fn comparisons(&self) -> Result<Vec<Comparison>> {
        let experimental = self.experimental.values()?;
        let calculated = self.calculated.values();

        if experimental.len() > calculated.len() {
            warn!(
                "{} experimental values have no calculated counterpart",
                experimental.len() - calculated.len()
            );
        }

        calculated
            .into_iter()
            .map(|(key, c)| {
                let e = experimental
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, e)| *e)
                    .ok_or_else(|| Error::KeyNotFound(f!("'{key}' on the experimental side")))?;

                let ratio = c.divide(e)?;
                debug!("C/E for {key}: {ratio}");
                Ok(Comparison {
                    key,
                    calculated: c,
                    experimental: e,
                    ratio,
                })
            })
            .collect()
    }

    /// The ratio of a single valued comparison, such as a spectral index
    pub fn ratio(&self) -> Result<Quantity> {
        let mut rows = self.comparisons()?;
        match rows.len() {
            1 => Ok(rows.remove(0).ratio),
            n => Err(Error::Validation(f!(
                "a single ratio needs one compared value, found {n}"
            ))),
        }
    }
}

/// Evaluate independent comparisons in parallel
///
/// Results are in the order of the input, and a failing comparison does not
/// affect the others.
pub fn compare_batch<C, E>(batch: &[CoverE<'_, C, E>]) -> Vec<Result<Vec<Comparison>>>
where
    C: Calculated + Sync,
    E: Experimental + Sync,
{
    debug!("Evaluating {} comparisons", batch.len());
    batch.par_iter().map(|ce| ce.comparisons()).collect()
}

/// Fixed width table of comparison rows for reports
///
/// ```rust
/// # use fctools_comparison::{summary_table, Comparison};
/// # use fctools_quantity::Quantity;
/// let row = Comparison {
///     key: "loc A".to_string(),
///     calculated: Quantity::new(1.01, 0.01).unwrap(),
///     experimental: Quantity::new(1.0, 0.02).unwrap(),
///     ratio: Quantity::new(1.01, 0.022).unwrap(),
/// };
///
/// let table = summary_table(&[row]);
/// assert_eq!(table.lines().count(), 2);
/// assert!(table.lines().nth(1).unwrap().starts_with("loc A"));
/// ```
pub fn summary_table(rows: &[Comparison]) -> String {
    let width = rows
        .iter()
        .map(|r| r.key.len())
        .max()
        .unwrap_or_default()
        .max(3);

    let mut table = f!(
        "{:<width$}{:>13}{:>13}{:>13}{:>13}{:>13}{:>13}{:>10}",
        "key",
        "C",
        "u(C)",
        "E",
        "u(E)",
        "C/E",
        "u(C/E)",
        "u [%]",
    );

    for r in rows {
        table.push('\n');
        table.push_str(&f!(
            "{:<width$}{:>13}{:>13}{:>13}{:>13}{:>13}{:>13}{:>10}",
            r.key,
            r.calculated.value().sci(5, 2),
            r.calculated.uncertainty().sci(5, 2),
            r.experimental.value().sci(5, 2),
            r.experimental.uncertainty().sci(5, 2),
            r.ratio.value().sci(5, 2),
            r.ratio.uncertainty().sci(5, 2),
            r.ratio
                .relative_uncertainty_percent()
                .map(|p| p.percent(3))
                .display(),
        ));
    }

    table
}
