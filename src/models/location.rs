//! Coordinate model shared by the resolver and weather readings

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build coordinates only when both components are present
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert_eq!(
            Coordinates::from_parts(Some(37.5), Some(127.0)),
            Some(Coordinates::new(37.5, 127.0))
        );
        assert_eq!(Coordinates::from_parts(Some(37.5), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(127.0)), None);
    }

    #[test]
    fn test_format_coordinates() {
        let coordinates = Coordinates::new(46.818_234, 8.227_456);
        assert_eq!(coordinates.format_coordinates(), "46.8182, 8.2275");
    }
}
