use crate::weather_data::error::WeatherDataError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VatavaranaError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    /// The chosen year/month has no records in the dataset. Recoverable: only the
    /// current computation is halted.
    #[error("No weather data available for {year:04}-{month:02}")]
    NoDataForPeriod { year: i32, month: u32 },

    #[error("'{year:04}-{month:02}' is not a valid calendar month")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
