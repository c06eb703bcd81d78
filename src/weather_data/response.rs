//! Wire types for the Open-Meteo archive response.
//!
//! The archive returns a `daily` object holding a `time` array of ISO dates and
//! one equally sized array per requested variable. Missing observations arrive
//! as JSON `null` and stay `None`; they are never turned into zeros.

use crate::types::daily_record::DailyRecord;
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub daily: DailySeries,
}

#[derive(Debug, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    #[serde(rename = "temperature_2m_max")]
    pub temp_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub temp_min: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_mean")]
    pub temp_mean: Vec<Option<f64>>,
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Vec<Option<f64>>,
    #[serde(rename = "rain_sum")]
    pub rain: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max: Vec<Option<f64>>,
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), WeatherDataError> {
    if found == expected {
        Ok(())
    } else {
        Err(WeatherDataError::SeriesLengthMismatch {
            field,
            expected,
            found,
        })
    }
}

impl DailySeries {
    /// Zips the per-variable arrays into one record per day. Every array must
    /// match the length of `time`; a mismatch is an error, never a truncation.
    pub fn into_records(self) -> Result<Vec<DailyRecord>, WeatherDataError> {
        let expected = self.time.len();
        check_len("temperature_2m_max", expected, self.temp_max.len())?;
        check_len("temperature_2m_min", expected, self.temp_min.len())?;
        check_len("temperature_2m_mean", expected, self.temp_mean.len())?;
        check_len("precipitation_sum", expected, self.precipitation.len())?;
        check_len("rain_sum", expected, self.rain.len())?;
        check_len("wind_speed_10m_max", expected, self.wind_speed_max.len())?;

        let mut records = Vec::with_capacity(expected);
        for (idx, date) in self.time.into_iter().enumerate() {
            records.push(DailyRecord {
                date,
                temp_max: self.temp_max[idx],
                temp_min: self.temp_min[idx],
                temp_mean: self.temp_mean[idx],
                precipitation: self.precipitation[idx],
                rain: self.rain[idx],
                wind_speed_max: self.wind_speed_max[idx],
            });
        }
        Ok(records)
    }
}
