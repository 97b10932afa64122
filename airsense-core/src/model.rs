use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "WAQI (Real)")]
    Waqi,
    #[serde(rename = "Simulated")]
    Simulated,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Waqi => "WAQI (Real)",
            Source::Simulated => "Simulated",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time air-quality observation.
///
/// `aqi` is always present; every other field degrades to a default when the
/// upstream payload omits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub aqi: i64,
    /// Estimated PM2.5 concentration in µg/m³.
    pub pm25: f64,
    /// Estimated PM10 concentration in µg/m³.
    pub pm10: f64,
    /// Temperature in °C, when the station reports one.
    pub temperature: Option<f64>,
    pub location: String,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
}

/// One predicted hour, label granularity only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourPoint {
    /// Display label, e.g. "09:00 AM".
    pub time: String,
    pub aqi: i64,
    pub category: &'static str,
    pub color: &'static str,
}

/// One predicted day, 1..=7 days ahead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    /// Weekday name, e.g. "Tuesday".
    pub day: String,
    /// Display date, e.g. "Jun 03".
    pub date: String,
    pub aqi: i64,
    pub category: &'static str,
    pub color: &'static str,
}

/// Structured chat reply returned to the end user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub recommendation: String,
    pub details: Vec<String>,
    pub source: String,
}
