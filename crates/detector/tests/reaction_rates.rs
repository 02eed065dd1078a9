//! Integration tests for reaction rate reduction

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use fctools_detector::tabular::read_samples;
use fctools_detector::{Error, RateIdentity, ReactionRate, ReactionRateSet, Sample};
use float_cmp::assert_approx_eq;
use rstest::{fixture, rstest};

use std::fs::File;

fn series(start: NaiveDateTime, values: &[f64]) -> Vec<Sample> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Sample::new(start + TimeDelta::seconds(i as i64), *v))
        .collect()
}

fn monitor_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 19)
        .unwrap()
        .and_hms_opt(11, 19, 20)
        .unwrap()
}

#[fixture]
fn power_monitor_1() -> ReactionRate {
    let samples = series(monitor_start(), &[0.0, 10.0, 15.0, 10.0, 20.0, 15.0, 10.0]);
    ReactionRate::new(RateIdentity::new("C1", "E1", "M"), monitor_start(), samples).unwrap()
}

#[fixture]
fn power_monitor_2() -> ReactionRate {
    let samples = series(monitor_start(), &[0.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0]);
    ReactionRate::new(RateIdentity::new("C1", "E1", "M"), monitor_start(), samples).unwrap()
}

#[fixture]
fn plateau_data() -> Vec<Sample> {
    read_samples(File::open("./data/plateau.csv").unwrap()).unwrap()
}

#[fixture]
fn rr_plateau(plateau_data: Vec<Sample>) -> ReactionRate {
    let start = plateau_data[0].time;
    ReactionRate::new(RateIdentity::new("A", "B", "1"), start, plateau_data).unwrap()
}

#[fixture]
fn plateau_monitor(plateau_data: Vec<Sample>) -> ReactionRate {
    let start = plateau_data[0].time;
    let samples = plateau_data
        .into_iter()
        .map(|s| Sample::new(s.time, if s.value > 3000.0 { 600.0 } else { 1.0 }))
        .collect();
    ReactionRate::new(RateIdentity::new("A", "B", "2"), start, samples).unwrap()
}

#[rstest]
fn best_monitor(power_monitor_1: ReactionRate, power_monitor_2: ReactionRate) {
    let pms = ReactionRateSet::new([(1, power_monitor_1.clone()), (2, power_monitor_2)]).unwrap();
    assert_eq!(pms.best().unwrap(), &power_monitor_1);
}

#[rstest]
fn best_monitor_tiebreak(power_monitor_1: ReactionRate) {
    // same counts in less time, so the same relative uncertainty at a higher rate
    let slow = power_monitor_1.clone().with_life_time(12.0).unwrap();
    let fast = power_monitor_1.with_life_time(6.0).unwrap();

    let pms = ReactionRateSet::new([("a", slow), ("b", fast.clone())]).unwrap();
    assert_eq!(pms.best().unwrap(), &fast);
}

#[rstest]
fn plateau_window(rr_plateau: ReactionRate) {
    let plateau = rr_plateau.plateau().unwrap();
    assert_eq!(plateau.range(), 91..440);
    assert_eq!(plateau.duration(), 348.0);
}

#[rstest]
fn per_unit_power(rr_plateau: ReactionRate, plateau_monitor: ReactionRate) {
    let rates = ReactionRateSet::new([(1, rr_plateau), (2, plateau_monitor)]).unwrap();
    let normalised = rates.per_unit_power(&2).unwrap();

    assert_eq!(normalised.len(), 1);
    let q = normalised[&1];
    assert_approx_eq!(f64, q.value(), 2307.211579, epsilon = 1e-6);
    assert_approx_eq!(f64, q.uncertainty(), 5.471836, epsilon = 1e-6);
    assert_approx_eq!(
        f64,
        q.relative_uncertainty_percent().unwrap(),
        0.237162,
        epsilon = 1e-6
    );
}

#[rstest]
fn per_unit_power_unknown_key(rr_plateau: ReactionRate, plateau_monitor: ReactionRate) {
    let rates = ReactionRateSet::new([(1, rr_plateau), (2, plateau_monitor)]).unwrap();
    assert!(matches!(
        rates.per_unit_power(&3),
        Err(Error::KeyNotFound(_))
    ));
}

#[rstest]
fn mixed_experiments_are_rejected(rr_plateau: ReactionRate, power_monitor_1: ReactionRate) {
    assert!(matches!(
        rr_plateau.per_unit_power(&power_monitor_1),
        Err(Error::MismatchedIdentity(_))
    ));
    assert!(matches!(
        ReactionRateSet::new([(1, rr_plateau), (2, power_monitor_1)]),
        Err(Error::MismatchedIdentity(_))
    ));
}

#[test]
fn empty_set_is_rejected() {
    let members: Vec<(u8, ReactionRate)> = Vec::new();
    assert!(matches!(
        ReactionRateSet::new(members),
        Err(Error::Validation(_))
    ));
}

#[rstest]
#[case(&[])]
#[case(&[1.0, -2.0])]
#[case(&[1.0, f64::NAN])]
fn invalid_series(#[case] values: &[f64]) {
    let samples = series(monitor_start(), values);
    let result = ReactionRate::new(RateIdentity::new("C1", "E1", "M"), monitor_start(), samples);
    assert!(matches!(result, Err(Error::Validation(_))));
}
