//! Alert card types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Total order used to prioritize cards: info < warning < danger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// The seven alert families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardKind {
    HeatWave,
    ColdWave,
    UvIndex,
    AirQuality,
    StrongWind,
    CarWash,
    Laundry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCard {
    pub kind: CardKind,
    pub severity: Severity,
    pub message: String,
    /// Raw values that produced the card
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::HeatWave => write!(f, "heatWave"),
            CardKind::ColdWave => write!(f, "coldWave"),
            CardKind::UvIndex => write!(f, "uvIndex"),
            CardKind::AirQuality => write!(f, "airQuality"),
            CardKind::StrongWind => write!(f, "strongWind"),
            CardKind::CarWash => write!(f, "carWash"),
            CardKind::Laundry => write!(f, "laundry"),
        }
    }
}
