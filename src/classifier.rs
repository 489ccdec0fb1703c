//! Weather description classification
//!
//! Maps a free-text weather description plus optional sunrise/sunset times to
//! one canonical condition. Clear and cloudy skies turn into the `sunset`
//! artwork outside daylight.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use tracing::trace;

use crate::models::CanonicalCondition;

/// Substrings that mark the clear/cloudy family
const CLEAR_OR_CLOUDY: &[&str] = &["clear", "few clouds", "scattered", "broken", "overcast"];

/// Ordered (pattern, condition) table, first match wins.
///
/// Order is load-bearing: "light rain and snow" is rainy because `rain`
/// precedes `snow`.
const CONDITION_TABLE: &[(&str, CanonicalCondition)] = &[
    ("clear sky", CanonicalCondition::Sunny),
    ("few clouds", CanonicalCondition::Sunny),
    ("scattered clouds", CanonicalCondition::Cloudy),
    ("broken clouds", CanonicalCondition::Cloudy),
    ("overcast clouds", CanonicalCondition::Cloudy),
    ("rain", CanonicalCondition::Rainy),
    ("shower rain", CanonicalCondition::Rainy),
    ("thunderstorm", CanonicalCondition::Rainy),
    ("snow", CanonicalCondition::Snowy),
    ("mist", CanonicalCondition::Foggy),
    ("fog", CanonicalCondition::Foggy),
    ("haze", CanonicalCondition::Foggy),
    ("smoke", CanonicalCondition::Foggy),
];

/// UTC hours treated as dusk or dawn when no ephemeris is known
const DUSK_HOURS: std::ops::RangeInclusive<u32> = 17..=19;
const DAWN_HOURS: std::ops::RangeInclusive<u32> = 5..=7;

#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherConditionClassifier;

impl WeatherConditionClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify a description. `now` defaults to the current time.
    #[must_use]
    pub fn classify(
        &self,
        description: &str,
        sunrise: Option<DateTime<Utc>>,
        sunset: Option<DateTime<Utc>>,
        now: Option<DateTime<Utc>>,
    ) -> CanonicalCondition {
        let description = description.to_lowercase();
        let now = now.unwrap_or_else(Utc::now);

        if is_clear_or_cloudy(&description) && is_night(sunrise, sunset, now) {
            trace!("'{}' at {} is outside daylight", description, now);
            return CanonicalCondition::Sunset;
        }

        CONDITION_TABLE
            .iter()
            .find(|(pattern, _)| description.contains(pattern))
            .map_or(CanonicalCondition::Sunny, |(_, condition)| *condition)
    }
}

/// Classify with the default classifier
#[must_use]
pub fn classify(
    description: &str,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    now: Option<DateTime<Utc>>,
) -> CanonicalCondition {
    WeatherConditionClassifier.classify(description, sunrise, sunset, now)
}

/// Whether a lowercased description belongs to the clear/cloudy family
#[must_use]
pub fn is_clear_or_cloudy(description: &str) -> bool {
    CLEAR_OR_CLOUDY
        .iter()
        .any(|pattern| description.contains(pattern))
}

/// Night detection on the UTC clock.
///
/// With both ephemeris times, night lies outside [sunrise, sunset]. When the
/// sunset clock time comes before sunrise (daylight spans UTC midnight) the
/// rule inverts. Without ephemeris the fixed dusk/dawn hours apply.
#[must_use]
pub fn is_night(
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match (sunrise, sunset) {
        (Some(sunrise), Some(sunset)) => {
            let rise = clock_time(sunrise);
            let set = clock_time(sunset);
            let current = clock_time(now);

            if rise < set {
                current < rise || current > set
            } else {
                current > set && current < rise
            }
        }
        _ => {
            let hour = now.hour();
            DUSK_HOURS.contains(&hour) || DAWN_HOURS.contains(&hour)
        }
    }
}

fn clock_time(timestamp: DateTime<Utc>) -> NaiveTime {
    timestamp.time()
}
