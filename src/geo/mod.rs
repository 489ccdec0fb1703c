//! Geo module
//!
//! This module resolves arbitrary locations to places with background artwork:
//! - Static city and fallback-region catalog
//! - Great-circle distance and nearest-neighbour search
//! - Per-country override strategies
//! - Injectable randomness for the blind-pick tiers
//! - The four-tier resolution cascade

pub mod catalog;
pub mod distance;
pub mod matcher;
pub mod overrides;
pub mod random;

pub use catalog::{normalize_city_name, normalize_country_code, Catalog, City, FallbackRegion};
pub use distance::distance_km;
pub use matcher::{GeoCityMatcher, MatchTier, PlaceMatch};
pub use overrides::{
    CountryOverride, LatitudeSplitOverride, NamedSubsetOverride, OverrideRegistry, SubRegionSplit,
};
pub use random::{FixedSequence, RandomSource, SeededRandom, ThreadRandom};
