//! Data models for the Skycast crate
//!
//! - Location: geographic coordinates
//! - Weather: a snapshot of weather measurements
//! - Condition: the canonical condition buckets

pub mod condition;
pub mod location;
pub mod weather;

pub use condition::CanonicalCondition;
pub use location::Coordinates;
pub use weather::WeatherReading;
