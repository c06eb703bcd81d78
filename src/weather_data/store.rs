//! Flat-file cache for the fetched dataset.
//!
//! One CSV file, header row `date,temp_max,temp_min,temp_mean,precipitation,
//! rain,wind_speed_max`, dates as `YYYY-MM-DD`, floats at two decimals.

use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::SCHEMA_COLUMNS;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::{fs, task};

pub const CACHE_FILE_NAME: &str = "bengaluru_weather_2014_2024.csv";

pub struct CacheStore {
    path: PathBuf,
}

fn cache_schema() -> Schema {
    Schema::from_iter(SCHEMA_COLUMNS.iter().map(|&name| {
        let dtype = if name == "date" {
            DataType::Date
        } else {
            DataType::Float64
        };
        Field::new(name.into(), dtype)
    }))
}

impl CacheStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join(CACHE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached dataset, or `None` when no cache file exists yet.
    ///
    /// The read is best-effort: a cell that does not parse under the cache
    /// schema becomes a null field rather than failing the whole load.
    pub async fn load(&self) -> Result<Option<DataFrame>, WeatherDataError> {
        if fs::metadata(&self.path).await.is_err() {
            return Ok(None);
        }
        let path = self.path.clone();
        let df = task::spawn_blocking(move || {
            CsvReadOptions::default()
                .with_has_header(true)
                .with_ignore_errors(true)
                .with_schema(Some(Arc::new(cache_schema())))
                .try_into_reader_with_file_path(Some(path.clone()))
                .map_err(|e| WeatherDataError::CsvReadPolars(path.clone(), e))?
                .finish()
                .map_err(|e| WeatherDataError::CsvReadPolars(path, e))
        })
        .await??;
        Ok(Some(df))
    }

    /// Persists the dataset, overwriting any prior cache. The CSV is written to
    /// a temp file in the same directory and moved into place so a crash cannot
    /// leave a half-written cache behind.
    pub async fn save(&self, df: DataFrame) -> Result<(), WeatherDataError> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| WeatherDataError::CacheDirCreation(dir.clone(), e))?;

        let path = self.path.clone();
        task::spawn_blocking(move || {
            let mut df = df;
            let mut temp = NamedTempFile::new_in(&dir)
                .map_err(|e| WeatherDataError::CsvWriteIo(path.clone(), e))?;
            CsvWriter::new(temp.as_file_mut())
                .include_header(true)
                .with_float_precision(Some(2))
                .finish(&mut df)
                .map_err(|e| WeatherDataError::CsvWritePolars(path.clone(), e))?;
            temp.persist(&path)
                .map_err(|e| WeatherDataError::CsvWriteIo(path.clone(), e.error))?;
            Ok::<(), WeatherDataError>(())
        })
        .await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::daily_record::DailyRecord;
    use crate::weather_data::extractor::{records_from_dataframe, records_to_dataframe};
    use chrono::NaiveDate;

    fn sample_records() -> Vec<DailyRecord> {
        (1..=5)
            .map(|day| DailyRecord {
                date: NaiveDate::from_ymd_opt(2019, 8, day).unwrap(),
                temp_max: Some(28.0 + day as f64 * 0.25),
                temp_min: Some(19.5),
                temp_mean: if day == 3 { None } else { Some(23.75) },
                precipitation: Some(day as f64 * 1.1),
                rain: if day == 2 { None } else { Some(day as f64) },
                wind_speed_max: Some(12.34),
            })
            .collect()
    }

    fn assert_close(a: Option<f64>, b: Option<f64>) {
        match (a, b) {
            (Some(x), Some(y)) => assert!((x - y).abs() < 0.005, "{x} != {y}"),
            (None, None) => {}
            other => panic!("null mismatch: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_cache_file_loads_as_none() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        assert!(store.load().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips_every_record() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let records = sample_records();

        store.save(records_to_dataframe(&records)?).await?;
        let loaded = store.load().await?.expect("cache file should exist");
        let loaded_records = records_from_dataframe(&loaded)?;

        assert_eq!(loaded_records.len(), records.len());
        for (got, want) in loaded_records.iter().zip(&records) {
            assert_eq!(got.date, want.date);
            assert_close(got.temp_max, want.temp_max);
            assert_close(got.temp_min, want.temp_min);
            assert_close(got.temp_mean, want.temp_mean);
            assert_close(got.precipitation, want.precipitation);
            assert_close(got.rain, want.rain);
            assert_close(got.wind_speed_max, want.wind_speed_max);
        }
        Ok(())
    }

    #[tokio::test]
    async fn save_overwrites_prior_cache() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let records = sample_records();

        store.save(records_to_dataframe(&records)?).await?;
        store.save(records_to_dataframe(&records[..2])?).await?;

        let loaded = store.load().await?.expect("cache file should exist");
        assert_eq!(loaded.height(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_cell_becomes_null_not_a_failure() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let csv = "date,temp_max,temp_min,temp_mean,precipitation,rain,wind_speed_max\n\
                   2020-07-01,30.10,21.00,25.50,0.00,0.00,15.00\n\
                   2020-07-02,garbage,21.20,25.10,4.20,4.20,18.00\n";
        tokio::fs::write(store.path(), csv).await.unwrap();

        let loaded = store.load().await?.expect("cache file should exist");
        let records = records_from_dataframe(&loaded)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].temp_max, None);
        assert_eq!(records[1].rain, Some(4.2));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_date_drops_only_that_row() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let csv = "date,temp_max,temp_min,temp_mean,precipitation,rain,wind_speed_max\n\
                   2020-07-01,30.10,21.00,25.50,0.00,0.00,15.00\n\
                   2020-07-99,29.80,21.20,25.10,4.20,4.20,18.00\n\
                   2020-07-03,28.40,20.90,24.60,1.10,1.10,16.00\n";
        tokio::fs::write(store.path(), csv).await.unwrap();

        let loaded = store.load().await?.expect("cache file should exist");
        assert_eq!(loaded.height(), 3);

        let records = records_from_dataframe(&loaded)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2020, 7, 3).unwrap());
        Ok(())
    }
}
