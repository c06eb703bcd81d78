//! Monthly aggregation and the fixed-threshold weather classification.

use crate::error::VatavaranaError;
use crate::types::daily_record::DailyRecord;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Coarse label for a month's overall weather character, derived from rain
/// frequency/volume and peak temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantWeather {
    RainDominant,
    HeatDominant,
    MixedWeather,
}

impl DominantWeather {
    /// Rules are evaluated in order; the first match wins.
    pub fn classify(total_rain: f64, rainy_days: usize, avg_max_temp: Option<f64>) -> Self {
        if total_rain > 0.0 && rainy_days >= 3 {
            DominantWeather::RainDominant
        } else if rainy_days == 0 && avg_max_temp.is_some_and(|t| t >= 32.0) {
            DominantWeather::HeatDominant
        } else {
            DominantWeather::MixedWeather
        }
    }
}

impl Display for DominantWeather {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            DominantWeather::RainDominant => "Rain Dominant",
            DominantWeather::HeatDominant => "Heat Dominant",
            DominantWeather::MixedWeather => "Mixed Weather",
        };
        write!(f, "{label}")
    }
}

/// Label for total monthly rainfall volume, independent of the dominant-weather
/// classification. Thresholds are millimeters with inclusive upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainIntensity {
    NoRain,
    LightRain,
    ModerateRain,
    HeavyRain,
}

impl RainIntensity {
    pub fn classify(total_rain: f64) -> Self {
        if total_rain == 0.0 {
            RainIntensity::NoRain
        } else if total_rain <= 50.0 {
            RainIntensity::LightRain
        } else if total_rain <= 150.0 {
            RainIntensity::ModerateRain
        } else {
            RainIntensity::HeavyRain
        }
    }
}

impl Display for RainIntensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            RainIntensity::NoRain => "No Rain",
            RainIntensity::LightRain => "Light Rain",
            RainIntensity::ModerateRain => "Moderate Rain",
            RainIntensity::HeavyRain => "Heavy Rain",
        };
        write!(f, "{label}")
    }
}

/// English month name for a 1-12 month number, for selector display.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// The descriptive statistics and labels for one monthly selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Sum of non-null daily rain, millimeters.
    pub total_rain: f64,
    /// Days with `rain > 0`.
    pub rainy_days: usize,
    /// Days without observed rain; `rainy_days + dry_days` equals the number
    /// of days in the selection.
    pub dry_days: usize,
    /// Null-ignoring mean of `temp_mean`; `None` when every value is null.
    pub avg_temp: Option<f64>,
    /// Null-ignoring mean of `temp_max`; `None` when every value is null.
    pub avg_max_temp: Option<f64>,
    pub dominant_weather: DominantWeather,
    pub rain_intensity: RainIntensity,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (count, sum) = values.fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

impl MonthlySummary {
    /// Computes the summary for one monthly selection.
    ///
    /// An empty selection is [`VatavaranaError::NoDataForPeriod`]; no statistics
    /// are computed for it, so there is no zero-filled or divide-by-zero result.
    pub fn from_records(
        year: i32,
        month: u32,
        records: &[DailyRecord],
    ) -> Result<MonthlySummary, VatavaranaError> {
        if records.is_empty() {
            return Err(VatavaranaError::NoDataForPeriod { year, month });
        }

        let total_rain: f64 = records.iter().filter_map(|r| r.rain).sum();
        let rainy_days = records
            .iter()
            .filter(|r| r.rain.is_some_and(|v| v > 0.0))
            .count();
        let dry_days = records.len() - rainy_days;
        let avg_temp = mean(records.iter().filter_map(|r| r.temp_mean));
        let avg_max_temp = mean(records.iter().filter_map(|r| r.temp_max));

        Ok(MonthlySummary {
            year,
            month,
            total_rain,
            rainy_days,
            dry_days,
            avg_temp,
            avg_max_temp,
            dominant_weather: DominantWeather::classify(total_rain, rainy_days, avg_max_temp),
            rain_intensity: RainIntensity::classify(total_rain),
        })
    }
}

impl Display for MonthlySummary {
    /// Renders the six labeled metrics of the dashboard.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn celsius(value: Option<f64>) -> String {
            value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
        }
        writeln!(
            f,
            "Monthly Weather Summary for {} {:04}",
            month_name(self.month).unwrap_or("month ?"),
            self.year
        )?;
        writeln!(f, "Dominant Weather: {}", self.dominant_weather)?;
        writeln!(f, "Average Temperature (°C): {}", celsius(self.avg_temp))?;
        writeln!(
            f,
            "Average Max Temperature (°C): {}",
            celsius(self.avg_max_temp)
        )?;
        writeln!(f, "Total Rainfall (mm): {:.2}", self.total_rain)?;
        writeln!(f, "Rainy Days: {}", self.rainy_days)?;
        write!(f, "Rain Intensity: {}", self.rain_intensity)
    }
}
