mod error;
mod summary;
mod types;
mod utils;
mod vatavarana;
mod weather_data;

pub use error::VatavaranaError;
pub use vatavarana::*;

pub use summary::{month_name, DominantWeather, MonthlySummary, RainIntensity};
pub use types::daily_frame::DailyFrame;
pub use types::daily_record::DailyRecord;

pub use weather_data::client::{
    ArchiveClient, ARCHIVE_URL, DAILY_VARIABLES, END_DATE, LATITUDE, LONGITUDE, START_DATE,
    TIMEZONE,
};
pub use weather_data::error::WeatherDataError;
pub use weather_data::extractor::{records_from_dataframe, records_to_dataframe};
pub use weather_data::retry::RetryConfig;
pub use weather_data::store::{CacheStore, CACHE_FILE_NAME};
