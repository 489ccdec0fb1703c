//! Static place catalog
//!
//! The catalog holds the supported cities, the country to city table, the
//! coarse fallback regions and the country to fallback-region table. It is
//! loaded once from JSON, validated and never mutated afterwards. The number
//! of entries is a property of the data file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::SkycastError;
use crate::models::Coordinates;
use crate::Result;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

static BUILTIN: LazyLock<std::result::Result<Catalog, String>> =
    LazyLock::new(|| Catalog::from_json(BUILTIN_CATALOG).map_err(|e| e.to_string()));

/// A supported city with its own background artwork
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    /// Canonical lowercase token, e.g. "seoul"
    pub key: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Region tag, e.g. "asia"
    pub region: String,
}

impl City {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A multi-country grouping used when no city-level match exists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FallbackRegion {
    pub key: String,
    /// Region tag the artwork lives under
    pub region: String,
    /// Centroid latitude
    pub latitude: f64,
    /// Centroid longitude
    pub longitude: f64,
}

impl FallbackRegion {
    #[must_use]
    pub fn centroid(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<City>,
    country_cities: HashMap<String, Vec<String>>,
    fallback_regions: Vec<FallbackRegion>,
    country_fallbacks: HashMap<String, String>,
}

/// Immutable, validated lookup tables
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: Vec<City>,
    city_index: HashMap<String, usize>,
    country_cities: HashMap<String, Vec<usize>>,
    fallback_regions: Vec<FallbackRegion>,
    country_fallbacks: HashMap<String, usize>,
}

impl Catalog {
    /// The catalog embedded in the binary
    pub fn builtin() -> Result<&'static Catalog> {
        BUILTIN
            .as_ref()
            .map_err(|message| SkycastError::catalog(message.clone()))
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading place catalog from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::build(file)
    }

    fn build(file: CatalogFile) -> Result<Self> {
        let CatalogFile {
            mut cities,
            country_cities: raw_country_cities,
            fallback_regions,
            country_fallbacks: raw_country_fallbacks,
        } = file;

        let mut city_index = HashMap::with_capacity(cities.len());
        for (index, city) in cities.iter_mut().enumerate() {
            if city.key.is_empty() || city.key != normalize_city_name(&city.key) {
                return Err(SkycastError::catalog(format!(
                    "City key '{}' must be a lowercase token without spaces",
                    city.key
                )));
            }
            if city.region.is_empty() {
                return Err(SkycastError::catalog(format!(
                    "City '{}' has no region",
                    city.key
                )));
            }
            city.country = normalize_country_code(&city.country);
            if city_index.insert(city.key.clone(), index).is_some() {
                return Err(SkycastError::catalog(format!(
                    "Duplicate city key '{}'",
                    city.key
                )));
            }
        }

        let mut country_cities = HashMap::with_capacity(raw_country_cities.len());
        for (country, keys) in raw_country_cities {
            let country = normalize_country_code(&country);
            let mut indices = Vec::with_capacity(keys.len());
            for key in keys {
                let index = *city_index.get(&key).ok_or_else(|| {
                    SkycastError::catalog(format!(
                        "Country {country} references unknown city '{key}'"
                    ))
                })?;
                if cities[index].country != country {
                    return Err(SkycastError::catalog(format!(
                        "City '{key}' is listed under {country} but belongs to {}",
                        cities[index].country
                    )));
                }
                indices.push(index);
            }
            if !indices.is_empty() {
                country_cities.insert(country, indices);
            }
        }

        let mut region_index = HashMap::with_capacity(fallback_regions.len());
        for (index, region) in fallback_regions.iter().enumerate() {
            if region_index.insert(region.key.clone(), index).is_some() {
                return Err(SkycastError::catalog(format!(
                    "Duplicate fallback region '{}'",
                    region.key
                )));
            }
        }

        let mut country_fallbacks = HashMap::with_capacity(raw_country_fallbacks.len());
        for (country, key) in raw_country_fallbacks {
            let index = *region_index.get(&key).ok_or_else(|| {
                SkycastError::catalog(format!(
                    "Country {country} falls back to unknown region '{key}'"
                ))
            })?;
            country_fallbacks.insert(normalize_country_code(&country), index);
        }

        debug!(
            "Place catalog loaded: {} cities, {} countries, {} fallback regions",
            cities.len(),
            country_cities.len(),
            fallback_regions.len()
        );

        Ok(Self {
            cities,
            city_index,
            country_cities,
            fallback_regions,
            country_fallbacks,
        })
    }

    /// All cities in catalog order
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Look up a city by its canonical key
    #[must_use]
    pub fn city(&self, key: &str) -> Option<&City> {
        self.city_index.get(key).map(|&index| &self.cities[index])
    }

    /// Supported cities of a country, in table order
    #[must_use]
    pub fn cities_in_country(&self, country: &str) -> Vec<&City> {
        self.country_cities
            .get(country)
            .map(|indices| indices.iter().map(|&index| &self.cities[index]).collect())
            .unwrap_or_default()
    }

    /// Country codes that have at least one supported city, sorted
    #[must_use]
    pub fn supported_countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = self.country_cities.keys().map(String::as_str).collect();
        countries.sort_unstable();
        countries
    }

    /// All fallback regions in catalog order
    #[must_use]
    pub fn fallback_regions(&self) -> &[FallbackRegion] {
        &self.fallback_regions
    }

    /// Look up a fallback region by key
    #[must_use]
    pub fn fallback_region(&self, key: &str) -> Option<&FallbackRegion> {
        self.fallback_regions.iter().find(|region| region.key == key)
    }

    /// The static fallback region of a country without supported cities
    #[must_use]
    pub fn fallback_for_country(&self, country: &str) -> Option<&FallbackRegion> {
        self.country_fallbacks
            .get(country)
            .map(|&index| &self.fallback_regions[index])
    }
}

/// Lowercase and drop all whitespace: "New York" becomes "newyork"
#[must_use]
pub fn normalize_city_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trim and uppercase an ISO country code
#[must_use]
pub fn normalize_country_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> &'static Catalog {
        Catalog::builtin().expect("embedded catalog must load")
    }

    #[test]
    fn test_normalize_city_name() {
        assert_eq!(normalize_city_name("New York"), "newyork");
        assert_eq!(normalize_city_name("  Los\tAngeles "), "losangeles");
        assert_eq!(normalize_city_name("SEOUL"), "seoul");
        assert_eq!(normalize_city_name(""), "");
    }

    #[test]
    fn test_normalize_country_code() {
        assert_eq!(normalize_country_code(" kr "), "KR");
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin();
        assert!(!catalog.cities().is_empty());
        assert!(!catalog.fallback_regions().is_empty());
        assert_eq!(catalog.city("seoul").map(|c| c.region.as_str()), Some("asia"));
    }

    #[test]
    fn test_country_table_round_trip() {
        let catalog = builtin();
        for country in catalog.supported_countries() {
            let cities = catalog.cities_in_country(country);
            assert!(!cities.is_empty(), "{country} has an empty city list");
            for city in cities {
                let found = catalog.city(&city.key).expect("listed city exists");
                assert!(!found.region.is_empty());
                assert_eq!(found.country, country);
            }
        }
    }

    #[test]
    fn test_supported_countries_sorted() {
        let catalog = builtin();
        let countries = catalog.supported_countries();
        assert!(countries.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(countries, catalog.supported_countries());
        assert!(countries.contains(&"KR"));
        assert!(!countries.contains(&"IN"));
    }

    #[test]
    fn test_every_city_has_region() {
        for city in builtin().cities() {
            assert!(!city.region.is_empty(), "{} has no region", city.key);
        }
    }

    #[test]
    fn test_fallback_lookup() {
        let catalog = builtin();
        let region = catalog.fallback_for_country("IN").expect("India falls back");
        assert_eq!(region.key, "south_asia");
        assert!(catalog.fallback_for_country("KR").is_none());
    }

    #[test]
    fn test_rejects_unknown_city_reference() {
        let json = r#"{
            "cities": [{ "key": "seoul", "country": "KR", "latitude": 37.5, "longitude": 127.0, "region": "asia" }],
            "country_cities": { "KR": ["seoul", "incheon"] },
            "fallback_regions": [],
            "country_fallbacks": {}
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, SkycastError::Catalog { .. }));
        assert!(err.to_string().contains("incheon"));
    }

    #[test]
    fn test_rejects_city_listed_under_wrong_country() {
        let json = r#"{
            "cities": [{ "key": "seoul", "country": "KR", "latitude": 37.5, "longitude": 127.0, "region": "asia" }],
            "country_cities": { "JP": ["seoul"] },
            "fallback_regions": [],
            "country_fallbacks": {}
        }"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_fallback_region() {
        let json = r#"{
            "cities": [],
            "country_cities": {},
            "fallback_regions": [{ "key": "south_asia", "region": "asia", "latitude": 22.0, "longitude": 79.0 }],
            "country_fallbacks": { "IN": "indian_subcontinent" }
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("indian_subcontinent"));
    }

    #[test]
    fn test_rejects_non_canonical_key() {
        let json = r#"{
            "cities": [{ "key": "New York", "country": "US", "latitude": 40.7, "longitude": -74.0, "region": "north_america" }],
            "country_cities": {},
            "fallback_regions": [],
            "country_fallbacks": {}
        }"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SkycastError::Parse { .. }));
    }
}
