//! Rule thresholds for the condition rule engine

use serde::{Deserialize, Serialize};

use crate::error::SkycastError;
use crate::Result;

/// Alert thresholds are inclusive. Activity precipitation and humidity limits
/// are strict upper bounds; the laundry wind range is inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    pub heat_danger: f64,
    pub heat_warning: f64,
    pub cold_danger: f64,
    pub cold_warning: f64,
    pub uv_danger: f64,
    pub uv_warning: f64,
    pub uv_info: f64,
    pub air_quality_danger: u8,
    pub air_quality_warning: u8,
    pub wind_danger: f64,
    pub wind_warning: f64,
    /// Car wash needs precipitation probability strictly below this
    pub car_wash_max_precipitation: f64,
    /// Car wash needs an air quality index at or below this
    pub car_wash_max_air_quality: u8,
    /// Laundry needs precipitation probability strictly below this
    pub laundry_max_precipitation: f64,
    /// Laundry needs humidity strictly below this
    pub laundry_max_humidity: f64,
    pub laundry_min_wind: f64,
    pub laundry_max_wind: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            heat_danger: 35.0,
            heat_warning: 33.0,
            cold_danger: -15.0,
            cold_warning: -12.0,
            uv_danger: 11.0,
            uv_warning: 8.0,
            uv_info: 6.0,
            air_quality_danger: 5,
            air_quality_warning: 4,
            wind_danger: 14.0,
            wind_warning: 9.0,
            car_wash_max_precipitation: 0.3,
            car_wash_max_air_quality: 2,
            laundry_max_precipitation: 0.2,
            laundry_max_humidity: 60.0,
            laundry_min_wind: 1.0,
            laundry_max_wind: 5.0,
        }
    }
}

impl RuleThresholds {
    /// Check that severities are ordered and ranges are sane
    pub fn validate(&self) -> Result<()> {
        if self.heat_danger < self.heat_warning {
            return Err(SkycastError::config(
                "Heat wave danger threshold must not be below the warning threshold",
            ));
        }
        if self.cold_danger > self.cold_warning {
            return Err(SkycastError::config(
                "Cold wave danger threshold must not be above the warning threshold",
            ));
        }
        if !(self.uv_info <= self.uv_warning && self.uv_warning <= self.uv_danger) {
            return Err(SkycastError::config(
                "UV thresholds must satisfy info <= warning <= danger",
            ));
        }
        if self.air_quality_danger < self.air_quality_warning {
            return Err(SkycastError::config(
                "Air quality danger threshold must not be below the warning threshold",
            ));
        }
        if !(1..=5).contains(&self.car_wash_max_air_quality) {
            return Err(SkycastError::config(
                "Car wash air quality limit must be on the 1-5 scale",
            ));
        }
        if self.wind_danger < self.wind_warning {
            return Err(SkycastError::config(
                "Strong wind danger threshold must not be below the warning threshold",
            ));
        }
        for (name, value) in [
            ("car_wash_max_precipitation", self.car_wash_max_precipitation),
            ("laundry_max_precipitation", self.laundry_max_precipitation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SkycastError::config(format!(
                    "{name} must be a probability between 0 and 1, got {value}"
                )));
            }
        }
        if self.laundry_min_wind > self.laundry_max_wind {
            return Err(SkycastError::config(
                "Laundry wind range is empty: min is above max",
            ));
        }
        Ok(())
    }
}
