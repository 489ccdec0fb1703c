//! Background asset selection
//!
//! Combines place resolution and condition classification into the asset key
//! `<region>/<place>_<condition>` that the asset lookup depends on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::WeatherConditionClassifier;
use crate::geo::{GeoCityMatcher, MatchTier, PlaceMatch, RandomSource};
use crate::models::{CanonicalCondition, Coordinates};
use crate::solar;

/// Everything needed to pick a background
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundRequest {
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sunset: Option<DateTime<Utc>>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

impl BackgroundRequest {
    #[must_use]
    pub fn new(city: &str, country: &str, description: &str) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    #[must_use]
    pub fn with_ephemeris(mut self, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        self.sunrise = Some(sunrise);
        self.sunset = Some(sunset);
        self
    }

    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

/// Selected asset plus the decisions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSelection {
    pub asset_key: String,
    pub place: PlaceMatch,
    pub condition: CanonicalCondition,
}

impl BackgroundSelection {
    /// Which resolution tier fired
    #[must_use]
    pub fn tier(&self) -> MatchTier {
        self.place.tier
    }
}

/// `<region>/<place>_<condition>`
#[must_use]
pub fn asset_key(place: &PlaceMatch, condition: CanonicalCondition) -> String {
    format!("{}_{}", place.asset_segment(), condition.as_str())
}

#[derive(Debug)]
pub struct BackgroundSelector<'c> {
    matcher: GeoCityMatcher<'c>,
    classifier: WeatherConditionClassifier,
    solar_ephemeris: bool,
}

impl<'c> BackgroundSelector<'c> {
    #[must_use]
    pub fn new(matcher: GeoCityMatcher<'c>, classifier: WeatherConditionClassifier) -> Self {
        Self {
            matcher,
            classifier,
            solar_ephemeris: false,
        }
    }

    /// Derive missing sunrise/sunset from the request coordinates
    #[must_use]
    pub fn with_solar_ephemeris(mut self, enabled: bool) -> Self {
        self.solar_ephemeris = enabled;
        self
    }

    #[must_use]
    pub fn matcher(&self) -> &GeoCityMatcher<'c> {
        &self.matcher
    }

    /// Asset key for a request
    pub fn select_background(
        &self,
        request: &BackgroundRequest,
        rng: &mut dyn RandomSource,
    ) -> String {
        self.select(request, rng).asset_key
    }

    /// Full selection including the tier that fired
    pub fn select(
        &self,
        request: &BackgroundRequest,
        rng: &mut dyn RandomSource,
    ) -> BackgroundSelection {
        let place = self.matcher.resolve_place(
            &request.city,
            &request.country,
            request.coordinates,
            rng,
        );

        let now = request.now.unwrap_or_else(Utc::now);
        let (sunrise, sunset) = self.ephemeris(request, now);
        let condition = self
            .classifier
            .classify(&request.description, sunrise, sunset, Some(now));

        let asset_key = asset_key(&place, condition);
        debug!(tier = place.tier.number(), "Selected background {}", asset_key);

        BackgroundSelection {
            asset_key,
            place,
            condition,
        }
    }

    fn ephemeris(
        &self,
        request: &BackgroundRequest,
        now: DateTime<Utc>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        if request.sunrise.is_some() && request.sunset.is_some() {
            return (request.sunrise, request.sunset);
        }

        match (self.solar_ephemeris, request.coordinates) {
            (true, Some(coordinates)) => match solar::sunrise_sunset(coordinates, now.date_naive()) {
                Ok((sunrise, sunset)) => (Some(sunrise), Some(sunset)),
                Err(e) => {
                    warn!("Could not derive ephemeris: {}", e);
                    (request.sunrise, request.sunset)
                }
            },
            _ => (request.sunrise, request.sunset),
        }
    }
}
