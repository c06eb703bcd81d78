use chrono::NaiveDate;

/// One calendar day's weather observation bundle for Bengaluru.
///
/// Every observation is optional: the archive reports `null` for days without a
/// measurement, and those nulls are carried through rather than coerced to zero.
#[derive(Debug, PartialEq, Clone)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Daily maximum 2 m air temperature, degrees Celsius.
    pub temp_max: Option<f64>,
    /// Daily minimum 2 m air temperature, degrees Celsius.
    pub temp_min: Option<f64>,
    /// Daily mean 2 m air temperature, degrees Celsius.
    pub temp_mean: Option<f64>,
    /// Total daily precipitation (rain, showers, snow), millimeters.
    pub precipitation: Option<f64>,
    /// Total daily rain, millimeters.
    pub rain: Option<f64>,
    /// Daily maximum 10 m wind speed, km/h.
    pub wind_speed_max: Option<f64>,
}
