//! `Skycast` - place-aware backgrounds and weather alert cards
//!
//! This library resolves arbitrary locations to a catalog of places with
//! artwork, buckets weather descriptions into canonical conditions, and turns
//! weather readings into prioritized alert cards.

pub mod alerts;
pub mod background;
pub mod classifier;
pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod models;
pub mod solar;

// Re-export core types for public API
pub use alerts::{CardKind, ConditionCard, ConditionRuleEngine, RuleThresholds, Severity};
pub use background::{asset_key, BackgroundRequest, BackgroundSelection, BackgroundSelector};
pub use classifier::WeatherConditionClassifier;
pub use config::SkycastConfig;
pub use error::SkycastError;
pub use geo::{Catalog, GeoCityMatcher, MatchTier, OverrideRegistry, PlaceMatch, RandomSource};
pub use models::{CanonicalCondition, Coordinates, WeatherReading};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;
