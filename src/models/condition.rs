//! Canonical weather conditions used to pick an asset variant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SkycastError;

/// One of the six classified weather buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Foggy,
    Sunset,
}

impl CanonicalCondition {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalCondition::Sunny => "sunny",
            CanonicalCondition::Cloudy => "cloudy",
            CanonicalCondition::Rainy => "rainy",
            CanonicalCondition::Snowy => "snowy",
            CanonicalCondition::Foggy => "foggy",
            CanonicalCondition::Sunset => "sunset",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [CanonicalCondition] {
        &[
            CanonicalCondition::Sunny,
            CanonicalCondition::Cloudy,
            CanonicalCondition::Rainy,
            CanonicalCondition::Snowy,
            CanonicalCondition::Foggy,
            CanonicalCondition::Sunset,
        ]
    }
}

impl fmt::Display for CanonicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalCondition {
    type Err = SkycastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        CanonicalCondition::all()
            .iter()
            .copied()
            .find(|condition| condition.as_str() == lower)
            .ok_or_else(|| SkycastError::unknown_condition(value))
    }
}

impl TryFrom<&str> for CanonicalCondition {
    type Error = SkycastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_as_str_roundtrip() {
        for condition in CanonicalCondition::all() {
            let parsed: CanonicalCondition = condition.as_str().parse().expect("known condition");
            assert_eq!(*condition, parsed);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            CanonicalCondition::try_from(" Sunset ").unwrap(),
            CanonicalCondition::Sunset
        );
    }

    #[test]
    fn unknown_condition_fails_fast() {
        let err = "hail".parse::<CanonicalCondition>().unwrap_err();
        assert!(matches!(err, SkycastError::UnknownCondition { ref value } if value == "hail"));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&CanonicalCondition::Foggy).unwrap();
        assert_eq!(json, "\"foggy\"");
    }
}
