//! Place resolution cascade
//!
//! Resolves an arbitrary (city, country, optional coordinates) tuple to a
//! place that has background artwork:
//!
//! 1. exact city match
//! 2. a supported city of the same country (nearest, else random)
//! 3. the country's fallback region
//! 4. the nearest fallback region, else a random catalog city
//!
//! Nearest-neighbour ties keep the first entry in catalog order.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::catalog::{normalize_city_name, normalize_country_code, Catalog, City, FallbackRegion};
use super::distance::nearest;
use super::overrides::OverrideRegistry;
use super::random::RandomSource;
use crate::models::Coordinates;
use crate::Result;

/// Which step of the cascade produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    SameCountry,
    RegionFallback,
    FinalFallback,
}

impl MatchTier {
    /// 1-based tier number
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            MatchTier::Exact => 1,
            MatchTier::SameCountry => 2,
            MatchTier::RegionFallback => 3,
            MatchTier::FinalFallback => 4,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "tier 1 (exact)"),
            MatchTier::SameCountry => write!(f, "tier 2 (same country)"),
            MatchTier::RegionFallback => write!(f, "tier 3 (region fallback)"),
            MatchTier::FinalFallback => write!(f, "tier 4 (final fallback)"),
        }
    }
}

/// Resolved place identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMatch {
    /// City key or fallback-region key
    pub key: String,
    /// Region tag the artwork lives under
    pub region: String,
    pub tier: MatchTier,
}

impl PlaceMatch {
    fn from_city(city: &City, tier: MatchTier) -> Self {
        Self {
            key: city.key.clone(),
            region: city.region.clone(),
            tier,
        }
    }

    fn from_fallback(region: &FallbackRegion, tier: MatchTier) -> Self {
        Self {
            key: region.key.clone(),
            region: region.region.clone(),
            tier,
        }
    }

    /// `<region>/<key>`
    #[must_use]
    pub fn asset_segment(&self) -> String {
        format!("{}/{}", self.region, self.key)
    }
}

/// Resolves places against a catalog and a set of country overrides
#[derive(Debug)]
pub struct GeoCityMatcher<'c> {
    catalog: &'c Catalog,
    overrides: OverrideRegistry,
}

impl GeoCityMatcher<'static> {
    /// Matcher over the embedded catalog with the default overrides
    pub fn builtin() -> Result<Self> {
        Self::new(Catalog::builtin()?, OverrideRegistry::with_defaults())
    }
}

impl<'c> GeoCityMatcher<'c> {
    /// Build a matcher, checking that every override fallback exists
    pub fn new(catalog: &'c Catalog, overrides: OverrideRegistry) -> Result<Self> {
        overrides.validate(catalog)?;
        Ok(Self { catalog, overrides })
    }

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Resolve a place. Never fails for any combination of inputs.
    pub fn resolve_place(
        &self,
        city_name: &str,
        country_code: &str,
        coordinates: Option<Coordinates>,
        rng: &mut dyn RandomSource,
    ) -> PlaceMatch {
        let city = normalize_city_name(city_name);
        let country = normalize_country_code(country_code);

        let place = self
            .exact_match(&city)
            .or_else(|| self.same_country(&city, &country, coordinates, rng))
            .or_else(|| self.region_fallback(&city, &country, coordinates))
            .unwrap_or_else(|| self.final_fallback(coordinates, rng));

        debug!(
            city = %city,
            country = %country,
            tier = place.tier.number(),
            "Resolved place {}",
            place.asset_segment()
        );

        place
    }

    fn exact_match(&self, city: &str) -> Option<PlaceMatch> {
        self.catalog
            .city(city)
            .map(|found| PlaceMatch::from_city(found, MatchTier::Exact))
    }

    fn same_country(
        &self,
        city: &str,
        country: &str,
        coordinates: Option<Coordinates>,
        rng: &mut dyn RandomSource,
    ) -> Option<PlaceMatch> {
        if country.is_empty() {
            return None;
        }

        let candidates = match self.overrides.get(country) {
            Some(strategy) => strategy.same_country_candidates(self.catalog, city)?,
            None => self.catalog.cities_in_country(country),
        };

        pick_city(&candidates, coordinates, rng)
            .map(|found| PlaceMatch::from_city(found, MatchTier::SameCountry))
    }

    fn region_fallback(
        &self,
        city: &str,
        country: &str,
        coordinates: Option<Coordinates>,
    ) -> Option<PlaceMatch> {
        if country.is_empty() {
            return None;
        }

        let region = match self.overrides.get(country) {
            Some(strategy) => self
                .catalog
                .fallback_region(strategy.fallback_region_key(city, coordinates)),
            None => self.catalog.fallback_for_country(country),
        }?;

        Some(PlaceMatch::from_fallback(region, MatchTier::RegionFallback))
    }

    fn final_fallback(
        &self,
        coordinates: Option<Coordinates>,
        rng: &mut dyn RandomSource,
    ) -> PlaceMatch {
        if let Some(center) = coordinates {
            if let Some((region, _)) = nearest(
                center,
                self.catalog.fallback_regions(),
                FallbackRegion::centroid,
            ) {
                debug!(
                    "Nearest fallback region to {} is {}",
                    center.format_coordinates(),
                    region.key
                );
                return PlaceMatch::from_fallback(region, MatchTier::FinalFallback);
            }
        }

        warn!("No coordinates or country match, picking a random catalog city");
        let cities: Vec<&City> = self.catalog.cities().iter().collect();
        match pick_city(&cities, None, rng) {
            Some(city) => PlaceMatch::from_city(city, MatchTier::FinalFallback),
            // An empty catalog still yields a well-formed key
            None => PlaceMatch {
                key: "default".to_string(),
                region: "default".to_string(),
                tier: MatchTier::FinalFallback,
            },
        }
    }
}

/// Nearest candidate when coordinates are known, else a uniform random pick
fn pick_city<'a>(
    candidates: &[&'a City],
    coordinates: Option<Coordinates>,
    rng: &mut dyn RandomSource,
) -> Option<&'a City> {
    if candidates.is_empty() {
        return None;
    }

    match coordinates {
        Some(center) => nearest(center, candidates.iter().copied(), City::coordinates)
            .map(|(city, _)| city),
        None => Some(candidates[rng.pick_index(candidates.len())]),
    }
}
