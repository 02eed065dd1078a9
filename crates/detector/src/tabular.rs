//! Readers for tabulated detector data
//!
//! Everything here deserialises comma separated text from any reader, with
//! whitespace around fields trimmed. The expected column headers are:
//!
//! | Reader                | Columns                       |
//! | --------------------- | ----------------------------- |
//! | [read_samples()]      | `Time,value`                  |
//! | [read_channels()]     | `channel,counts`              |
//! | [read_calibration()]  | `channel,value,uncertainty`   |
//! | [read_composition()]  | `nuclide,share,uncertainty`   |
//!
//! Timestamps may use either a `T` or a space between date and time, with
//! optional fractional seconds.

// internal modules
use crate::effective_mass::{CalibrationPoint, Composition};
use crate::error::{Error, Result};
use crate::reaction_rate::Sample;
use crate::spectrum::ChannelCount;

// fctools modules
use fctools_utils::f;

// external crates
use chrono::NaiveDateTime;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// standard library
use std::io::Read;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Read a count rate time series
///
/// ```rust
/// # use fctools_detector::tabular::read_samples;
/// let text = "Time,value\n2024-05-27 13:19:20,12\n2024-05-27T13:19:21,14\n";
/// let samples = read_samples(text.as_bytes()).unwrap();
/// assert_eq!(samples.len(), 2);
/// assert_eq!(samples[1].value, 14.0);
/// ```
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>> {
    read_records::<RawSample, R>(reader)?
        .into_iter()
        .map(|raw| {
            Ok(Sample {
                time: parse_time(&raw.time)?,
                value: raw.value,
            })
        })
        .collect()
}

/// Read the channels of a pulse height spectrum
pub fn read_channels<R: Read>(reader: R) -> Result<Vec<ChannelCount>> {
    read_records(reader)
}

/// Read an effective mass calibration table
pub fn read_calibration<R: Read>(reader: R) -> Result<Vec<CalibrationPoint>> {
    read_records(reader)
}

/// Read the nuclide composition of a deposit
pub fn read_composition<R: Read>(reader: R) -> Result<Vec<Composition>> {
    read_records(reader)
}

/// Deserialise every row of a headed table
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let records = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<T>()
        .collect::<core::result::Result<Vec<T>, csv::Error>>()?;

    debug!("Read {} tabulated records", records.len());
    Ok(records)
}

/// Parse a timestamp in any of the accepted layouts
pub fn parse_time(text: &str) -> Result<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| Error::Validation(f!("unrecognised timestamp '{text}'")))
}

#[derive(Deserialize)]
struct RawSample {
    #[serde(rename = "Time")]
    time: String,
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_with_padding() {
        let text = "channel, counts\n1, 5\n 2 ,7\n";
        let channels = read_channels(text.as_bytes()).unwrap();
        assert_eq!(channels, vec![ChannelCount::new(1, 5.0), ChannelCount::new(2, 7.0)]);
    }

    #[test]
    fn calibration_rows() {
        let text = "channel,value,uncertainty\n6,60,0.1\n7,59.5,0.1\n";
        let rows = read_calibration(text.as_bytes()).unwrap();
        assert_eq!(rows[1], CalibrationPoint::new(7.0, 59.5, 0.1));
    }

    #[test]
    fn composition_rows() {
        let text = "nuclide,share,uncertainty\nU235,0.93,0.01\nU238,0.07,0.01\n";
        let rows = read_composition(text.as_bytes()).unwrap();
        assert_eq!(rows[0].nuclide, "U235");
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "channel\n1\n";
        assert!(matches!(
            read_channels(text.as_bytes()),
            Err(Error::CsvError(_))
        ));
    }

    #[test]
    fn bad_timestamp() {
        let text = "Time,value\n27/05/2024,1\n";
        assert!(matches!(
            read_samples(text.as_bytes()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn fractional_seconds() {
        let time = parse_time("2024-05-27 13:19:20.500").unwrap();
        assert_eq!(time.and_utc().timestamp_subsec_millis(), 500);
    }
}
