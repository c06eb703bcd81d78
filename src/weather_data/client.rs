//! HTTP client for the Open-Meteo historical archive.
//!
//! One request covers the whole fixed location and date range; everything else
//! in the crate works off the cached result.

use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::records_to_dataframe;
use crate::weather_data::response::ArchiveResponse;
use crate::weather_data::retry::{with_retry, RetryConfig};
use log::info;
use polars::frame::DataFrame;
use reqwest::Client;

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Bengaluru city center.
pub const LATITUDE: f64 = 12.9716;
pub const LONGITUDE: f64 = 77.5937;

pub const START_DATE: &str = "2014-01-01";
pub const END_DATE: &str = "2024-12-31";
pub const TIMEZONE: &str = "Asia/Kolkata";

/// The six daily variables, in cache-column order.
pub const DAILY_VARIABLES: [&str; 6] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "temperature_2m_mean",
    "precipitation_sum",
    "rain_sum",
    "wind_speed_10m_max",
];

pub struct ArchiveClient {
    http: Client,
    retry: RetryConfig,
}

impl ArchiveClient {
    pub fn new() -> Self {
        Self::with_retry_config(RetryConfig::default())
    }

    pub fn with_retry_config(retry: RetryConfig) -> Self {
        Self {
            http: Client::new(),
            retry,
        }
    }

    /// Fetches the full 2014-2024 daily dataset in a single archive call and
    /// returns it as a frame in cache-column order.
    ///
    /// Transport failures that survive the retry budget surface as
    /// [`WeatherDataError::DataUnavailable`]; a final non-success status as
    /// [`WeatherDataError::HttpStatus`]. Missing per-day observations stay null.
    pub async fn fetch_daily(&self) -> Result<DataFrame, WeatherDataError> {
        let params: [(&str, String); 6] = [
            ("latitude", LATITUDE.to_string()),
            ("longitude", LONGITUDE.to_string()),
            ("start_date", START_DATE.to_string()),
            ("end_date", END_DATE.to_string()),
            ("daily", DAILY_VARIABLES.join(",")),
            ("timezone", TIMEZONE.to_string()),
        ];

        info!(
            "Requesting daily archive {} for ({}, {}) over [{}, {}]",
            ARCHIVE_URL, LATITUDE, LONGITUDE, START_DATE, END_DATE
        );

        let response = with_retry(&self.retry, || {
            self.http.get(ARCHIVE_URL).query(&params).send()
        })
        .await
        .map_err(|failure| WeatherDataError::DataUnavailable {
            url: ARCHIVE_URL.to_string(),
            attempts: failure.attempts,
            source: failure.source,
        })?;

        let response = response
            .error_for_status()
            .map_err(|e| WeatherDataError::HttpStatus {
                url: ARCHIVE_URL.to_string(),
                status: e.status().unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
                source: e,
            })?;

        let body: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| WeatherDataError::ResponseDecode(ARCHIVE_URL.to_string(), e))?;

        let records = body.daily.into_records()?;
        info!("Archive returned {} daily records", records.len());
        records_to_dataframe(&records)
    }
}

impl Default for ArchiveClient {
    fn default() -> Self {
        Self::new()
    }
}
