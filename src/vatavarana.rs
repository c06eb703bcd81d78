//! The main entry point: fetch-or-load the Bengaluru daily dataset, then
//! filter and summarize it by calendar month.

use crate::error::VatavaranaError;
use crate::summary::MonthlySummary;
use crate::types::daily_frame::DailyFrame;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use crate::weather_data::client::ArchiveClient;
use crate::weather_data::frame_store::FrameStore;
use crate::weather_data::retry::RetryConfig;
use bon::bon;
use std::path::PathBuf;

/// Client for the Bengaluru historical weather dataset (2014-2024).
///
/// The first data access per cache directory performs one archive fetch and
/// writes the CSV cache; every later access, in this process or the next one,
/// is served from cache. All request methods borrow the same in-memory dataset.
///
/// # Examples
///
/// ```no_run
/// # use vatavarana::{Vatavarana, VatavaranaError};
/// # async fn run() -> Result<(), VatavaranaError> {
/// let client = Vatavarana::new().await?;
/// let summary = client.monthly_summary().year(2024).month(6).call().await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub struct Vatavarana {
    store: FrameStore,
}

#[bon]
impl Vatavarana {
    /// Creates a client using the default cache directory (resolved via the
    /// `dirs` crate, e.g. `~/.cache/vatavarana_cache` on Linux).
    pub async fn new() -> Result<Self, VatavaranaError> {
        let cache_folder = get_cache_dir().map_err(VatavaranaError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Creates a client with an explicit cache directory, creating it if
    /// needed.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, VatavaranaError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| VatavaranaError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            store: FrameStore::new(&cache_folder),
        })
    }

    /// Like [`Vatavarana::with_cache_folder`], with a custom retry policy for
    /// the archive request.
    pub async fn with_retry_config(
        cache_folder: PathBuf,
        retry: RetryConfig,
    ) -> Result<Self, VatavaranaError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| VatavaranaError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            store: FrameStore::with_client(&cache_folder, ArchiveClient::with_retry_config(retry)),
        })
    }

    /// The full daily dataset as a lazy frame wrapper.
    pub async fn daily(&self) -> Result<DailyFrame, VatavaranaError> {
        Ok(DailyFrame::new(self.store.get_frame().await?))
    }

    /// Distinct years present in the dataset, ascending.
    pub async fn available_years(&self) -> Result<Vec<i32>, VatavaranaError> {
        self.daily().await?.years()
    }

    /// One calendar month of daily rows, e.g. for a raw-data table or charts.
    ///
    /// # Arguments
    ///
    /// * `.year(i32)`: **Required.**
    /// * `.month(u32)`: **Required.** 1-12; anything else is
    ///   [`VatavaranaError::InvalidPeriod`].
    #[builder]
    pub async fn monthly(&self, year: i32, month: u32) -> Result<DailyFrame, VatavaranaError> {
        self.daily().await?.get_month(year, month)
    }

    /// Statistics and labels for one calendar month.
    ///
    /// An in-range month with no records is
    /// [`VatavaranaError::NoDataForPeriod`]; the error carries the period so a
    /// caller can show a warning and keep its previous state.
    #[builder]
    pub async fn monthly_summary(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, VatavaranaError> {
        let records = self
            .daily()
            .await?
            .get_month(year, month)?
            .collect_records()?;
        MonthlySummary::from_records(year, month, &records)
    }
}
