//! Weather reading model consumed by the rule engine and background selector

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A single snapshot of weather measurements.
///
/// Optional measurements are absent when the upstream service did not report
/// them. They are never defaulted to zero: rules that need them are skipped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WeatherReading {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Apparent temperature in Celsius
    #[serde(default)]
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    #[serde(default)]
    pub humidity: f64,
    /// Wind speed in m/s
    #[serde(default)]
    pub wind_speed: f64,
    /// Human-readable description of weather conditions
    #[serde(default)]
    pub description: String,
    /// Atmospheric pressure in hPa
    #[serde(default)]
    pub pressure: f64,
    /// Visibility in meters
    #[serde(default)]
    pub visibility: f64,
    /// UV index
    #[serde(default)]
    pub uv_index: Option<f64>,
    /// Air quality index on the 1 (good) to 5 (very poor) scale
    #[serde(default)]
    pub air_quality: Option<u8>,
    /// Fine particulate matter in µg/m³
    #[serde(default)]
    pub pm2_5: Option<f64>,
    /// Coarse particulate matter in µg/m³
    #[serde(default)]
    pub pm10: Option<f64>,
    /// Probability of precipitation (0.0-1.0)
    #[serde(default)]
    pub precipitation_probability: f64,
    #[serde(default)]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sunset: Option<DateTime<Utc>>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl WeatherReading {
    /// Create a reading with only a temperature set
    #[must_use]
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            feels_like: temperature,
            ..Self::default()
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}
