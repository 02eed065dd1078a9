//! Integration tests for normalised rates, spectral indices, and traverses

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use fctools_detector::tabular::read_samples;
use fctools_detector::{
    CalibrationPoint, ChannelCount, EffectiveMass, FissionFragmentSpectrum, RateIdentity,
    ReactionRate, Sample, SpectrumIdentity,
};
use fctools_experimental::{Error, NormalizedFissionFragmentSpectrum, SpectralIndex, Traverse};
use float_cmp::assert_approx_eq;
use rstest::{fixture, rstest};

use std::fs::File;

const COUNTS: [f64; 42] = [
    0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0, 1.0, 3.0, 4.0, 2.0, 4.0, 1.0, 3.0, 5.0,
    80.0, 65.0, 35.0, 5.0, 20.0, 25.0, 35.0, 55.0, 58.0, 60.0, 62.0, 70.0, 65.0, 50.0, 45.0, 40.0,
    37.0, 34.0, 25.0, 20.0, 13.0, 5.0, 1.0, 0.0,
];

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 18)
        .unwrap()
        .and_hms_opt(20, 30, 15)
        .unwrap()
}

fn spectrum(detector: &str, deposit: &str, location: &str) -> FissionFragmentSpectrum {
    let identity = SpectrumIdentity {
        campaign_id: "A".into(),
        experiment_id: "B".into(),
        detector_id: detector.into(),
        deposit_id: deposit.into(),
        location_id: location.into(),
        measurement_id: format!("F{detector}"),
    };
    let channels = (1..).zip(COUNTS).map(|(c, n)| ChannelCount::new(c, n)).collect();
    FissionFragmentSpectrum::new(identity, start(), 10.0, 10.0, channels).unwrap()
}

fn effective_mass(detector: &str, deposit: &str) -> EffectiveMass {
    let values = [60.0, 80.0, 88.0, 87.0, 87.0, 88.0, 86.0, 85.0, 82.0, 78.0];
    let uncertainties = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.1];
    let integral = (0..10)
        .map(|i| CalibrationPoint::new(6.0 + 2.0 * i as f64, values[i], uncertainties[i]))
        .collect();
    EffectiveMass::new(deposit, detector, integral, 42).unwrap()
}

#[fixture]
fn power_monitor() -> ReactionRate {
    let values = [100.0, 101.0, 99.0, 98.0, 101.0, 100.0, 99.0, 98.0, 102.0, 102.0];
    let samples = values
        .iter()
        .chain(values.iter())
        .enumerate()
        .map(|(i, v)| Sample::new(start() + TimeDelta::seconds(i as i64), *v))
        .collect();
    let identity = RateIdentity::new("C", "B", "M").with_deposit("dep");
    let time = NaiveDate::from_ymd_opt(2024, 5, 29)
        .unwrap()
        .and_hms_opt(12, 25, 10)
        .unwrap();
    ReactionRate::new(identity, time, samples).unwrap()
}

#[fixture]
fn ffs_1() -> FissionFragmentSpectrum {
    spectrum("C1", "D1", "E")
}

#[fixture]
fn ffs_2() -> FissionFragmentSpectrum {
    spectrum("C2", "D2", "E")
}

#[fixture]
fn em_1() -> EffectiveMass {
    effective_mass("C1", "D1")
}

#[fixture]
fn em_2() -> EffectiveMass {
    effective_mass("C2", "D2")
}

#[rstest]
fn normalised_rate(ffs_1: FissionFragmentSpectrum, em_1: EffectiveMass, power_monitor: ReactionRate) {
    let rr = NormalizedFissionFragmentSpectrum::new(&ffs_1, &em_1, &power_monitor).unwrap();
    let value = rr.value().unwrap();

    // 6 counts above channel 40, per 10 s, per 100 monitor counts/s, per 60
    assert_approx_eq!(f64, value.value(), 1.0e-4, epsilon = 1e-15);
    assert_approx_eq!(
        f64,
        value.relative_uncertainty().unwrap(),
        (1.0 / 6.0 + 1.0 / 2000.0 + (0.1f64 / 60.0).powi(2)).sqrt(),
        epsilon = 1e-12
    );
}

#[rstest]
fn mismatched_calibration(ffs_1: FissionFragmentSpectrum, em_2: EffectiveMass, power_monitor: ReactionRate) {
    assert!(matches!(
        NormalizedFissionFragmentSpectrum::new(&ffs_1, &em_2, &power_monitor),
        Err(Error::MismatchedIdentity(_))
    ));
}

#[rstest]
fn coarse_calibration_merges_channels(ffs_1: FissionFragmentSpectrum, power_monitor: ReactionRate) {
    let integral = vec![CalibrationPoint::new(3.0, 60.0, 0.1)];
    let em = EffectiveMass::new("D1", "C1", integral, 21).unwrap();

    let rr = NormalizedFissionFragmentSpectrum::new(&ffs_1, &em, &power_monitor).unwrap();
    assert_eq!(rr.spectrum().len(), 21);
    // channel 20 of the merged spectrum holds original channels 39 and 40
    assert_eq!(rr.spectrum().integral_above(20).unwrap().value(), 19.0);
}

#[rstest]
fn spectral_index_order(
    ffs_1: FissionFragmentSpectrum,
    ffs_2: FissionFragmentSpectrum,
    em_1: EffectiveMass,
    em_2: EffectiveMass,
    power_monitor: ReactionRate,
) {
    let rr_1 = NormalizedFissionFragmentSpectrum::new(&ffs_1, &em_1, &power_monitor).unwrap();
    let rr_2 = NormalizedFissionFragmentSpectrum::new(&ffs_2, &em_2, &power_monitor).unwrap();
    let si = SpectralIndex::new(rr_1, rr_2).unwrap();

    assert_eq!(si.deposit_ids(), ["D1".to_string(), "D2".to_string()]);

    let value = si.value().unwrap();
    assert_approx_eq!(f64, value.value(), 1.0, epsilon = 1e-12);
    assert_approx_eq!(f64, value.uncertainty(), 0.5782204500784186, epsilon = 1e-12);
}

#[rstest]
fn spectral_index_needs_two_deposits(
    ffs_1: FissionFragmentSpectrum,
    em_1: EffectiveMass,
    power_monitor: ReactionRate,
) {
    let rr_1 = NormalizedFissionFragmentSpectrum::new(&ffs_1, &em_1, &power_monitor).unwrap();
    assert!(matches!(
        SpectralIndex::new(rr_1.clone(), rr_1),
        Err(Error::Validation(_))
    ));
}

#[rstest]
fn spectral_index_needs_one_location(
    ffs_1: FissionFragmentSpectrum,
    em_1: EffectiveMass,
    em_2: EffectiveMass,
    power_monitor: ReactionRate,
) {
    let elsewhere = spectrum("C2", "D2", "G");
    let rr_1 = NormalizedFissionFragmentSpectrum::new(&ffs_1, &em_1, &power_monitor).unwrap();
    let rr_2 = NormalizedFissionFragmentSpectrum::new(&elsewhere, &em_2, &power_monitor).unwrap();
    assert!(matches!(
        SpectralIndex::new(rr_1, rr_2),
        Err(Error::MismatchedIdentity(_))
    ));
}

fn detector(id: &str, deposit: &str, value: f64) -> ReactionRate {
    let samples = (0..10)
        .map(|i| Sample::new(start() + TimeDelta::seconds(i), value))
        .collect();
    let identity = RateIdentity::new("A", "B", id).with_deposit(deposit);
    ReactionRate::new(identity, start(), samples).unwrap()
}

#[test]
fn traverse_keeps_order() {
    let (a, b, c) = (
        detector("1", "dep", 4.0),
        detector("1", "dep", 9.0),
        detector("1", "dep", 1.0),
    );
    let traverse = Traverse::new([("loc B", &b), ("loc A", &a), ("loc C", &c)]).unwrap();

    assert_eq!(traverse.locations(), vec!["loc B", "loc A", "loc C"]);
    assert_eq!(traverse.deposit_ids().unwrap(), vec!["dep".to_string()]);

    // ten 1 s samples each
    let values = traverse.values().unwrap();
    assert_eq!(values[0].1.value(), 9.0);
    assert_eq!(values[2].1.value(), 1.0);
}

#[rstest]
#[case(vec![("loc A", "dep"), ("loc A", "dep")])]
#[case(vec![(" ", "dep")])]
#[case(vec![])]
fn invalid_traverse(#[case] points: Vec<(&str, &str)>) {
    let rates = points
        .iter()
        .map(|(l, d)| (*l, detector("1", d, 1.0)))
        .collect::<Vec<_>>();
    let result = Traverse::new(rates.iter().map(|(l, rr)| (*l, rr)));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn traverse_of_mixed_deposits() {
    let (a, b) = (detector("1", "U235", 1.0), detector("2", "U238", 1.0));
    let traverse = Traverse::new([("loc A", &a), ("loc B", &b)]).unwrap();
    assert!(matches!(
        traverse.deposit_ids(),
        Err(Error::MismatchedIdentity(_))
    ));
}

#[test]
fn traverse_normalised_to_unknown_location() {
    let a = detector("1", "dep", 1.0);
    let traverse = Traverse::new([("loc A", &a)]).unwrap();
    assert!(matches!(
        traverse.normalised_to("loc Z"),
        Err(Error::KeyNotFound(_))
    ));
}

/// In-beam detector series and the monitor recorded alongside it
fn beam_pair(start: NaiveDateTime, scale: f64) -> (ReactionRate, ReactionRate) {
    let data = read_samples(File::open("./data/plateau.csv").unwrap()).unwrap();
    let build = |id: &str, f: &dyn Fn(f64) -> f64| {
        let samples = data
            .iter()
            .enumerate()
            .map(|(i, s)| Sample::new(start + TimeDelta::seconds(i as i64), f(s.value * scale)))
            .collect();
        let identity = RateIdentity::new("A", "B", id).with_deposit("dep");
        ReactionRate::new(identity, start, samples).unwrap()
    };

    let rate = build("1", &|v: f64| v);
    let monitor = build("2", &|v: f64| if v > 1000.0 { 600.0 } else { 1.0 });
    (rate, monitor)
}

#[test]
fn traverse_per_unit_power() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap();
    let (t1, t2) = (
        day.and_hms_opt(13, 19, 20).unwrap(),
        day.and_hms_opt(15, 12, 42).unwrap(),
    );
    let (rr_1, monitor_1) = beam_pair(t1, 1.0);
    let (rr_2, monitor_2) = beam_pair(t2, 0.5);

    let traverse = Traverse::new([
        ("loc A", (&rr_1, &monitor_1)),
        ("loc B", (&rr_2, &monitor_2)),
    ])
    .unwrap();

    let values = traverse.values().unwrap();
    assert_approx_eq!(f64, values[0].1.value(), 2307.2115792714812, epsilon = 1e-9);
    assert_approx_eq!(f64, values[1].1.value(), 2307.2115792714812 / 2.0, epsilon = 1e-9);

    let profile = traverse.normalised_to("loc A").unwrap();
    assert_eq!(profile[0].1.value(), 1.0);
    assert_approx_eq!(f64, profile[1].1.value(), 0.5, epsilon = 1e-15);
    assert_eq!(traverse.deposit_ids().unwrap(), vec!["dep".to_string()]);
}

#[test]
fn traverse_monitor_from_another_experiment() {
    let t0 = start();
    let rr = detector("1", "dep", 1.0);
    let samples = (0..10)
        .map(|i| Sample::new(t0 + TimeDelta::seconds(i), 1.0))
        .collect();
    let monitor = ReactionRate::new(RateIdentity::new("A", "other", "2"), t0, samples).unwrap();

    let traverse = Traverse::new([("loc A", (&rr, &monitor))]).unwrap();
    assert!(matches!(
        traverse.values(),
        Err(Error::DetectorError(fctools_detector::Error::MismatchedIdentity(_)))
    ));
}
