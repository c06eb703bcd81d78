//! Conversions between the polars frame and `DailyRecord` rows.

use crate::types::daily_record::DailyRecord;
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;

/// Cache-file column order: `date` first, then the six observation fields.
pub const SCHEMA_COLUMNS: [&str; 7] = [
    "date",
    "temp_max",
    "temp_min",
    "temp_mean",
    "precipitation",
    "rain",
    "wind_speed_max",
];

// Days between 0001-01-01 and the 1970-01-01 epoch polars dates count from.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn f64_column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> Result<&'a Float64Chunked, WeatherDataError> {
    df.column(name)
        .map_err(|e| WeatherDataError::ColumnNotFound(name.to_string(), e))?
        .f64()
        .map_err(WeatherDataError::from)
}

/// Collects a frame with the cache schema into one record per row.
///
/// Rows whose date failed to parse (nulled by a best-effort cache load) are
/// dropped, with a warning naming how many; null observation fields are kept
/// as `None`.
pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<DailyRecord>, WeatherDataError> {
    let dates = df
        .column("date")
        .map_err(|e| WeatherDataError::ColumnNotFound("date".to_string(), e))?
        .date()
        .map_err(WeatherDataError::from)?;
    let temp_max = f64_column(df, "temp_max")?;
    let temp_min = f64_column(df, "temp_min")?;
    let temp_mean = f64_column(df, "temp_mean")?;
    let precipitation = f64_column(df, "precipitation")?;
    let rain = f64_column(df, "rain")?;
    let wind_speed_max = f64_column(df, "wind_speed_max")?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for idx in 0..df.height() {
        let Some(days_since_epoch) = dates.get(idx) else {
            dropped += 1;
            continue;
        };
        let Some(date) = NaiveDate::from_num_days_from_ce_opt(days_since_epoch + EPOCH_DAYS_FROM_CE)
        else {
            dropped += 1;
            continue;
        };
        records.push(DailyRecord {
            date,
            temp_max: temp_max.get(idx),
            temp_min: temp_min.get(idx),
            temp_mean: temp_mean.get(idx),
            precipitation: precipitation.get(idx),
            rain: rain.get(idx),
            wind_speed_max: wind_speed_max.get(idx),
        });
    }
    if dropped > 0 {
        warn!(
            "Dropped {} of {} rows with unreadable dates from the dataset",
            dropped,
            df.height()
        );
    }
    Ok(records)
}

/// Builds a frame with the cache schema from records. This is the only place a
/// dataset frame is constructed, so the fetched data and the cached data share
/// one column layout.
pub fn records_to_dataframe(records: &[DailyRecord]) -> Result<DataFrame, WeatherDataError> {
    let dates = DateChunked::from_naive_date("date".into(), records.iter().map(|r| r.date));

    let float_column = |name: &str, values: Vec<Option<f64>>| Column::new(name.into(), values);
    let columns = vec![
        Column::from(dates.into_series()),
        float_column("temp_max", records.iter().map(|r| r.temp_max).collect()),
        float_column("temp_min", records.iter().map(|r| r.temp_min).collect()),
        float_column("temp_mean", records.iter().map(|r| r.temp_mean).collect()),
        float_column(
            "precipitation",
            records.iter().map(|r| r.precipitation).collect(),
        ),
        float_column("rain", records.iter().map(|r| r.rain).collect()),
        float_column(
            "wind_speed_max",
            records.iter().map(|r| r.wind_speed_max).collect(),
        ),
    ];
    DataFrame::new(columns).map_err(WeatherDataError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: (i32, u32, u32), rain: Option<f64>) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            temp_max: Some(30.0),
            temp_min: Some(20.5),
            temp_mean: Some(25.25),
            precipitation: rain,
            rain,
            wind_speed_max: Some(14.0),
        }
    }

    #[test]
    fn round_trips_records_through_a_frame() -> Result<(), WeatherDataError> {
        let records = vec![
            record((2020, 7, 1), Some(4.2)),
            record((2020, 7, 2), None),
            record((2020, 7, 3), Some(0.0)),
        ];
        let df = records_to_dataframe(&records)?;
        assert_eq!(df.shape(), (3, 7));
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>(),
            SCHEMA_COLUMNS
        );

        let back = records_from_dataframe(&df)?;
        assert_eq!(back, records);
        Ok(())
    }

    #[test]
    fn empty_record_set_builds_an_empty_frame() -> Result<(), WeatherDataError> {
        let df = records_to_dataframe(&[])?;
        assert_eq!(df.height(), 0);
        assert!(records_from_dataframe(&df)?.is_empty());
        Ok(())
    }
}
