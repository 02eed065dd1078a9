//! Integration tests for spectra and effective mass calibrations

use chrono::{NaiveDate, NaiveDateTime};
use fctools_detector::tabular::{read_calibration, read_channels};
use fctools_detector::{EffectiveMass, Error, FissionFragmentSpectrum, SpectrumIdentity};
use float_cmp::assert_approx_eq;
use rstest::{fixture, rstest};

use std::fs::File;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 18)
        .unwrap()
        .and_hms_opt(20, 30, 15)
        .unwrap()
}

#[fixture]
fn spectrum() -> FissionFragmentSpectrum {
    let identity = SpectrumIdentity {
        campaign_id: "A".into(),
        experiment_id: "B".into(),
        detector_id: "C1".into(),
        deposit_id: "D1".into(),
        location_id: "E".into(),
        measurement_id: "F1".into(),
    };
    let channels = read_channels(File::open("./data/spectrum.csv").unwrap()).unwrap();
    FissionFragmentSpectrum::new(identity, start(), 10.0, 10.0, channels).unwrap()
}

#[fixture]
fn effective_mass() -> EffectiveMass {
    let integral = read_calibration(File::open("./data/calibration.csv").unwrap()).unwrap();
    EffectiveMass::new("D1", "C1", integral, 42).unwrap()
}

#[rstest]
fn integral_bounds(spectrum: FissionFragmentSpectrum) {
    let total = spectrum.integral_above(1).unwrap();
    assert_eq!(total.value(), 943.0);
    assert_approx_eq!(f64, total.uncertainty(), 943f64.sqrt());

    let beyond = spectrum.integral_above(43).unwrap();
    assert_eq!(beyond.value(), 0.0);
    assert_eq!(beyond.uncertainty(), 0.0);
}

#[rstest]
#[case(40, 6.0)]
#[case(41, 1.0)]
#[case(19, 905.0)]
fn integral_above_channel(spectrum: FissionFragmentSpectrum, #[case] channel: u32, #[case] expected: f64) {
    assert_eq!(spectrum.integral_above(channel).unwrap().value(), expected);
}

#[rstest]
fn spectrum_peak(spectrum: FissionFragmentSpectrum) {
    assert_eq!(spectrum.max_channel(), 19);
    assert_eq!(spectrum.dead_time(), 0.0);
}

#[rstest]
fn rebinned_spectrum_keeps_counts(spectrum: FissionFragmentSpectrum) {
    let merged = spectrum.rebin(21).unwrap();
    assert_eq!(merged.len(), 21);
    assert_eq!(merged.integral_above(1).unwrap().value(), 943.0);
    assert!(matches!(spectrum.rebin(5), Err(Error::Validation(_))));
}

#[rstest]
fn default_composition(effective_mass: EffectiveMass) {
    let composition = effective_mass.composition();
    assert_eq!(composition.len(), 1);
    assert_eq!(composition[0].nuclide, "D1");
    assert_eq!(composition[0].share, 1.0);
    assert_eq!(composition[0].uncertainty, 0.0);
    assert_eq!(effective_mass.share("D1").unwrap().value(), 1.0);
}

#[rstest]
fn discrimination(effective_mass: EffectiveMass) {
    assert_eq!(effective_mass.discrimination_channel(), 40);

    let value = effective_mass.discrimination_value().unwrap();
    assert_eq!(value.value(), 60.0);
    assert_eq!(value.uncertainty(), 0.1);
}
