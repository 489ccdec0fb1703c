//! Per-country exceptions to the resolution cascade
//!
//! Some countries should not snap every unknown city to whichever supported
//! city happens to be nearest. Each exception is a [`CountryOverride`]
//! registered by country code. An override decides which supported cities a
//! requested name may snap to (tier 2) and which fallback sub-region to use
//! when it may not (tier 3).

use std::collections::HashMap;
use std::fmt;

use super::catalog::{normalize_city_name, normalize_country_code, Catalog, City};
use crate::error::SkycastError;
use crate::models::Coordinates;
use crate::Result;

/// Per-country resolution strategy
pub trait CountryOverride: Send + Sync + fmt::Debug {
    /// ISO country code this override applies to
    fn country(&self) -> &str;

    /// Supported cities a normalized city name may snap to.
    ///
    /// `None` skips same-country resolution for this name.
    fn same_country_candidates<'c>(&self, catalog: &'c Catalog, city: &str) -> Option<Vec<&'c City>>;

    /// Fallback region key for a name that did not snap
    fn fallback_region_key(&self, city: &str, coordinates: Option<Coordinates>) -> &str;

    /// Every fallback key this override can return
    fn fallback_region_keys(&self) -> Vec<&str>;

    /// Catalog city keys the override snaps names to directly
    fn snapped_city_keys(&self) -> Vec<&str> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    South,
    North,
}

/// Splits a country into a south and a north half.
///
/// Name lists win over the raw latitude cut.
#[derive(Debug, Clone)]
pub struct SubRegionSplit {
    /// Latitudes strictly below this are south
    pub threshold_latitude: f64,
    pub south_names: Vec<String>,
    pub north_names: Vec<String>,
    pub south_fallback: String,
    pub north_fallback: String,
    /// Used when neither a name list nor coordinates decide the side
    pub default_fallback: String,
}

impl SubRegionSplit {
    /// Side decided by the explicit name lists only
    #[must_use]
    pub fn side_by_name(&self, city: &str) -> Option<Side> {
        if self.south_names.iter().any(|name| name == city) {
            Some(Side::South)
        } else if self.north_names.iter().any(|name| name == city) {
            Some(Side::North)
        } else {
            None
        }
    }

    #[must_use]
    pub fn side_by_latitude(&self, latitude: f64) -> Side {
        if latitude < self.threshold_latitude {
            Side::South
        } else {
            Side::North
        }
    }

    #[must_use]
    pub fn fallback_key(&self, city: &str, coordinates: Option<Coordinates>) -> &str {
        let side = self
            .side_by_name(city)
            .or_else(|| coordinates.map(|c| self.side_by_latitude(c.latitude)));

        match side {
            Some(Side::South) => &self.south_fallback,
            Some(Side::North) => &self.north_fallback,
            None => &self.default_fallback,
        }
    }

    fn keys(&self) -> Vec<&str> {
        vec![
            self.south_fallback.as_str(),
            self.north_fallback.as_str(),
            self.default_fallback.as_str(),
        ]
    }
}

/// Only a named subset of requested cities may snap, each to its own metro
#[derive(Debug, Clone)]
pub struct NamedSubsetOverride {
    pub country: String,
    /// Normalized requested name to catalog city key
    pub metro_names: HashMap<String, String>,
    pub split: SubRegionSplit,
}

impl CountryOverride for NamedSubsetOverride {
    fn country(&self) -> &str {
        &self.country
    }

    fn same_country_candidates<'c>(&self, catalog: &'c Catalog, city: &str) -> Option<Vec<&'c City>> {
        let key = self.metro_names.get(city)?;
        catalog
            .city(key)
            .filter(|metro| metro.country == self.country)
            .map(|metro| vec![metro])
    }

    fn fallback_region_key(&self, city: &str, coordinates: Option<Coordinates>) -> &str {
        self.split.fallback_key(city, coordinates)
    }

    fn fallback_region_keys(&self) -> Vec<&str> {
        self.split.keys()
    }

    fn snapped_city_keys(&self) -> Vec<&str> {
        self.metro_names.values().map(String::as_str).collect()
    }
}

/// Supported cities are split into south and north sub-catalogs by latitude;
/// requested names pick a side through the split's name lists
#[derive(Debug, Clone)]
pub struct LatitudeSplitOverride {
    pub country: String,
    pub split: SubRegionSplit,
}

impl CountryOverride for LatitudeSplitOverride {
    fn country(&self) -> &str {
        &self.country
    }

    fn same_country_candidates<'c>(&self, catalog: &'c Catalog, city: &str) -> Option<Vec<&'c City>> {
        let side = self.split.side_by_name(city)?;
        let cities: Vec<&City> = catalog
            .cities_in_country(&self.country)
            .into_iter()
            .filter(|candidate| self.split.side_by_latitude(candidate.latitude) == side)
            .collect();
        (!cities.is_empty()).then_some(cities)
    }

    fn fallback_region_key(&self, city: &str, coordinates: Option<Coordinates>) -> &str {
        self.split.fallback_key(city, coordinates)
    }

    fn fallback_region_keys(&self) -> Vec<&str> {
        self.split.keys()
    }
}

/// Overrides keyed by country code
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    overrides: HashMap<String, Box<dyn CountryOverride>>,
}

impl OverrideRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override, replacing any earlier one for the same country
    pub fn register(&mut self, strategy: Box<dyn CountryOverride>) {
        let country = normalize_country_code(strategy.country());
        self.overrides.insert(country, strategy);
    }

    #[must_use]
    pub fn get(&self, country: &str) -> Option<&dyn CountryOverride> {
        self.overrides.get(country).map(Box::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Check that every fallback key and snapped city an override can produce exists
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        for (country, strategy) in &self.overrides {
            for key in strategy.snapped_city_keys() {
                if catalog.city(key).is_none_or(|city| city.country != *country) {
                    return Err(SkycastError::catalog(format!(
                        "Override for {country} snaps to '{key}', which is not a {country} catalog city"
                    )));
                }
            }
            for key in strategy.fallback_region_keys() {
                if catalog.fallback_region(key).is_none() {
                    return Err(SkycastError::catalog(format!(
                        "Override for {country} refers to unknown fallback region '{key}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The United States and China exceptions
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(united_states()));
        registry.register(Box::new(china()));
        registry
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| normalize_city_name(name)).collect()
}

fn metros(groups: &[(&str, &[&str])]) -> HashMap<String, String> {
    groups
        .iter()
        .flat_map(|(metro, neighbours)| {
            neighbours
                .iter()
                .map(move |name| (normalize_city_name(name), (*metro).to_string()))
        })
        .collect()
}

/// Only the boroughs and neighbours of the two supported metros snap; the
/// rest of the country uses a sun-belt / northern split
#[must_use]
pub fn united_states() -> NamedSubsetOverride {
    NamedSubsetOverride {
        country: "US".to_string(),
        metro_names: metros(&[
            (
                "newyork",
                &["Manhattan", "Brooklyn", "Queens", "Bronx", "Staten Island", "Jersey City", "Newark"],
            ),
            (
                "losangeles",
                &["Hollywood", "Santa Monica", "Pasadena", "Long Beach", "Burbank", "Anaheim"],
            ),
        ]),
        split: SubRegionSplit {
            threshold_latitude: 37.0,
            south_names: names(&[
                "Houston",
                "Dallas",
                "Austin",
                "San Antonio",
                "Miami",
                "Orlando",
                "Tampa",
                "Atlanta",
                "New Orleans",
                "Phoenix",
                "Las Vegas",
                "San Diego",
            ]),
            north_names: names(&[
                "Chicago",
                "Seattle",
                "Boston",
                "Detroit",
                "Minneapolis",
                "Denver",
                "Portland",
                "Philadelphia",
                "Washington",
                "San Francisco",
            ]),
            south_fallback: "us_south".to_string(),
            north_fallback: "us_north".to_string(),
            default_fallback: "us_north".to_string(),
        },
    }
}

/// South and north of the Qinling-Huaihe line
#[must_use]
pub fn china() -> LatitudeSplitOverride {
    LatitudeSplitOverride {
        country: "CN".to_string(),
        split: SubRegionSplit {
            threshold_latitude: 33.0,
            south_names: names(&[
                "Chengdu", "Chongqing", "Wuhan", "Hangzhou", "Nanjing", "Shenzhen", "Xiamen",
                "Kunming", "Changsha", "Suzhou", "Fuzhou", "Nanning", "Guiyang", "Hefei",
                "Nanchang", "Haikou", "Sanya",
            ]),
            north_names: names(&[
                "Tianjin",
                "Shenyang",
                "Dalian",
                "Qingdao",
                "Xian",
                "Zhengzhou",
                "Jinan",
                "Changchun",
                "Taiyuan",
                "Shijiazhuang",
                "Hohhot",
                "Lanzhou",
                "Urumqi",
            ]),
            south_fallback: "south_china".to_string(),
            north_fallback: "north_china".to_string(),
            default_fallback: "north_china".to_string(),
        },
    }
}
