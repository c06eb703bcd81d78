use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    /// The archive could not be reached within the retry budget. Fatal on a first
    /// run: there is no cache to fall back to.
    #[error("Weather archive unavailable for {url} (gave up after {attempts} attempts)")]
    DataUnavailable {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode archive response from {0}")]
    ResponseDecode(String, #[source] reqwest::Error),

    #[error("Archive series '{field}' has {found} values, expected {expected}")]
    SeriesLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("I/O error reading cache file '{0}'")]
    CsvReadIo(PathBuf, #[source] std::io::Error),

    #[error("Parsing error reading cache file '{0}'")]
    CsvReadPolars(PathBuf, #[source] PolarsError),

    #[error("I/O error writing cache file '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing cache file '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),
}
