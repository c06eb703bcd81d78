//! Session-level dataset store.
//!
//! The dataset moves through exactly two states: unpopulated (nothing in
//! memory) and populated (the frame is memoized for the rest of the session).
//! Population prefers the on-disk CSV cache and falls back to one archive
//! fetch, writing the cache before the data is served.

use crate::weather_data::client::ArchiveClient;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::store::CacheStore;
use log::{info, warn};
use polars::prelude::{IntoLazy, LazyFrame};
use std::path::Path;
use tokio::sync::Mutex;

pub struct FrameStore {
    store: CacheStore,
    client: ArchiveClient,
    frame: Mutex<Option<LazyFrame>>,
}

impl FrameStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            store: CacheStore::new(cache_dir),
            client: ArchiveClient::new(),
            frame: Mutex::new(None),
        }
    }

    pub fn with_client(cache_dir: &Path, client: ArchiveClient) -> Self {
        Self {
            store: CacheStore::new(cache_dir),
            client,
            frame: Mutex::new(None),
        }
    }

    /// Returns the session dataset, populating it on first use.
    pub async fn get_frame(&self) -> Result<LazyFrame, WeatherDataError> {
        // Fast path: already populated.
        {
            let guard = self.frame.lock().await;
            if let Some(frame) = guard.as_ref() {
                return Ok(frame.clone());
            }
            // Release the lock before any I/O.
        }

        let df = match self.store.load().await? {
            Some(df) => {
                info!(
                    "Cache hit: loaded {} daily records from {:?}",
                    df.height(),
                    self.store.path()
                );
                df
            }
            None => {
                warn!(
                    "Cache miss at {:?}: fetching the archive dataset",
                    self.store.path()
                );
                let df = self.client.fetch_daily().await?;
                self.store.save(df.clone()).await?;
                info!("Cached {} daily records to {:?}", df.height(), self.store.path());
                df
            }
        };
        let lazy = df.lazy();

        let mut guard = self.frame.lock().await;
        if let Some(existing) = guard.as_ref() {
            // Another caller populated the store while we were loading; keep
            // the first frame so every caller sees the same dataset.
            return Ok(existing.clone());
        }
        *guard = Some(lazy.clone());
        Ok(lazy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::daily_record::DailyRecord;
    use crate::weather_data::extractor::records_to_dataframe;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn populates_from_disk_cache_without_network() -> Result<(), WeatherDataError> {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![DailyRecord {
            date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            temp_max: Some(27.0),
            temp_min: Some(16.0),
            temp_mean: Some(21.5),
            precipitation: Some(0.0),
            rain: Some(0.0),
            wind_speed_max: Some(9.0),
        }];
        CacheStore::new(dir.path())
            .save(records_to_dataframe(&records)?)
            .await?;

        let store = FrameStore::new(dir.path());
        let first = store.get_frame().await?.collect()?;
        assert_eq!(first.height(), 1);

        // Second call must come from the memoized frame, not another load.
        let second = store.get_frame().await?.collect()?;
        assert_eq!(second.height(), 1);
        Ok(())
    }
}
