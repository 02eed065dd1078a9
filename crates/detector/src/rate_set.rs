//! Module for the simultaneous detectors of one experiment

// internal modules
use crate::config::TIE_TOLERANCE;
use crate::error::{Error, Result};
use crate::reaction_rate::ReactionRate;

// fctools modules
use fctools_quantity::Quantity;
use fctools_utils::f;

// external crates
use log::{debug, trace};

// standard library
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Keyed collection of [ReactionRate] series from one experiment
///
/// Every member shares the same campaign and experiment. Keys are ordered so
/// that iteration and any derived collections are deterministic.
///
/// ```rust
/// # use fctools_detector::{RateIdentity, ReactionRate, ReactionRateSet, Sample};
/// # use chrono::{NaiveDate, TimeDelta};
/// # let t0 = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// # let monitor = |id: &str, v: &[f64]| {
/// #     let samples = v
/// #         .iter()
/// #         .enumerate()
/// #         .map(|(i, v)| Sample::new(t0 + TimeDelta::seconds(i as i64), *v))
/// #         .collect();
/// #     ReactionRate::new(RateIdentity::new("C1", "E1", id), t0, samples).unwrap()
/// # };
/// let set = ReactionRateSet::new([
///     ("pm1", monitor("M", &[0.0, 10.0, 15.0, 10.0, 20.0, 15.0, 10.0])),
///     ("pm2", monitor("M", &[0.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0])),
/// ])
/// .unwrap();
///
/// // more counts in the same time, so a smaller relative uncertainty
/// let best = set.best().unwrap();
/// assert_eq!(best.counts(), 80.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRateSet<K: Ord + Clone + Debug> {
    members: BTreeMap<K, ReactionRate>,
}

impl<K: Ord + Clone + Debug> ReactionRateSet<K> {
    /// Collect rates that belong to the same experiment
    ///
    /// Fails on an empty input or when any member differs in campaign or
    /// experiment from the others. A repeated key keeps the last member.
    pub fn new(members: impl IntoIterator<Item = (K, ReactionRate)>) -> Result<Self> {
        let members = members.into_iter().collect::<BTreeMap<K, ReactionRate>>();

        let Some((first_key, first)) = members.iter().next() else {
            return Err(Error::Validation(f!("a reaction rate set needs members")));
        };

        if let Some((key, rate)) = members.iter().find(|(_, rr)| {
            rr.campaign_id() != first.campaign_id() || rr.experiment_id() != first.experiment_id()
        }) {
            return Err(Error::MismatchedIdentity(f!(
                "{key:?} is from {}/{} but {first_key:?} is from {}/{}",
                rate.campaign_id(),
                rate.experiment_id(),
                first.campaign_id(),
                first.experiment_id()
            )));
        }

        Ok(Self { members })
    }

    /// Shared campaign identifier
    pub fn campaign_id(&self) -> &str {
        self.first().campaign_id()
    }

    /// Shared experiment identifier
    pub fn experiment_id(&self) -> &str {
        self.first().experiment_id()
    }

    /// Member for a key
    pub fn get(&self, key: &K) -> Option<&ReactionRate> {
        self.members.get(key)
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.members.keys()
    }

    /// Members in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &ReactionRate)> {
        self.members.iter()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false, a set has at least one member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member with the smallest relative uncertainty on its rate
    ///
    /// Relative uncertainties equal within a tight relative tolerance are
    /// resolved by the higher rate, and then by the first key.
    pub fn best(&self) -> Result<&ReactionRate> {
        let mut ranked = Vec::with_capacity(self.members.len());
        for (key, rr) in &self.members {
            let rate = rr.rate()?;
            let relative = rate.relative_uncertainty().unwrap_or(f64::INFINITY);
            trace!("{key:?} rate {rate} (relative {relative})");
            ranked.push((key, rr, relative, rate.value()));
        }

        // min_by keeps the first of equal elements
        let (key, best, _, _) = ranked
            .into_iter()
            .min_by(|a, b| compare_precision((a.2, a.3), (b.2, b.3)))
            .ok_or_else(|| Error::Validation(f!("a reaction rate set needs members")))?;

        debug!("Best monitor is {key:?} ({})", best.identity());
        Ok(best)
    }

    /// Normalise every other member to the monitor under `key`
    pub fn per_unit_power(&self, key: &K) -> Result<BTreeMap<K, Quantity>> {
        let monitor = self
            .members
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(f!("{key:?}")))?;

        self.members
            .iter()
            .filter(|(k, _)| *k != key)
            .map(|(k, rr)| Ok((k.clone(), rr.per_unit_power(monitor)?)))
            .collect()
    }

    fn first(&self) -> &ReactionRate {
        // construction guarantees at least one member
        self.members
            .values()
            .next()
            .unwrap_or_else(|| unreachable!("empty reaction rate set"))
    }
}

/// Order by relative uncertainty, then by descending rate
fn compare_precision(a: (f64, f64), b: (f64, f64)) -> Ordering {
    let (rel_a, rate_a) = a;
    let (rel_b, rate_b) = b;

    let scale = rel_a.abs().max(rel_b.abs());
    let tied = rel_a == rel_b || (scale.is_finite() && (rel_a - rel_b).abs() <= TIE_TOLERANCE * scale);

    if tied {
        rate_b.total_cmp(&rate_a)
    } else {
        rel_a.total_cmp(&rel_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_resolves_to_rate() {
        let a = (0.1, 5.0);
        let b = (0.1 * (1.0 + 1e-14), 6.0);
        assert_eq!(compare_precision(a, b), Ordering::Greater);
        assert_eq!(compare_precision(b, a), Ordering::Less);
    }

    #[test]
    fn undefined_uncertainty_sorts_last() {
        let a = (f64::INFINITY, 100.0);
        let b = (0.5, 1.0);
        assert_eq!(compare_precision(a, b), Ordering::Greater);
    }
}
