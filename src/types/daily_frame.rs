//! `DailyFrame`: lazy operations over the Bengaluru daily dataset.

use crate::error::VatavaranaError;
use crate::types::daily_record::DailyRecord;
use crate::weather_data::extractor::records_from_dataframe;
use chrono::{Months, NaiveDate};
use polars::prelude::{col, lit, DataType, Expr, LazyFrame};

/// A wrapper around a polars `LazyFrame` holding daily weather rows in the
/// cache schema. Filtering returns a new frame; the wrapped dataset is never
/// mutated.
#[derive(Clone)]
pub struct DailyFrame {
    /// The underlying polars LazyFrame containing the daily data.
    pub frame: LazyFrame,
}

impl DailyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary polars predicate lazily, leaving `self` unchanged.
    pub fn filter(&self, predicate: Expr) -> DailyFrame {
        DailyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps only dates within `[start, end]`, both ends inclusive.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DailyFrame {
        self.filter(
            col("date")
                .cast(DataType::Date)
                .gt_eq(lit(start))
                .and(col("date").cast(DataType::Date).lt_eq(lit(end))),
        )
    }

    /// Keeps only the days of one calendar month (the monthly selection).
    ///
    /// A month outside 1-12 is rejected up front rather than silently yielding
    /// an empty frame.
    pub fn get_month(&self, year: i32, month: u32) -> Result<DailyFrame, VatavaranaError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(VatavaranaError::InvalidPeriod { year, month })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or(VatavaranaError::InvalidPeriod { year, month })?;
        Ok(self.get_range(start, end))
    }

    /// Distinct calendar years present in the frame, ascending. Feeds the year
    /// selector of a UI on top of this crate.
    pub fn years(&self) -> Result<Vec<i32>, VatavaranaError> {
        let df = self
            .frame
            .clone()
            .select([col("date").dt().year().alias("year")])
            .collect()?;
        let mut years: Vec<i32> = df.column("year")?.i32()?.into_iter().flatten().collect();
        years.sort_unstable();
        years.dedup();
        Ok(years)
    }

    /// Materializes the frame into one `DailyRecord` per row.
    pub fn collect_records(&self) -> Result<Vec<DailyRecord>, VatavaranaError> {
        let df = self.frame.clone().collect()?;
        records_from_dataframe(&df).map_err(VatavaranaError::from)
    }
}
