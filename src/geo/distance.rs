//! Great-circle distance and nearest-point search

use crate::models::Coordinates;

/// Haversine distance in kilometers on a sphere of radius 6371 km
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    )
}

/// Find the item closest to `center`.
///
/// Ties keep the first item in iteration order.
pub fn nearest<'a, T, I, F>(center: Coordinates, items: I, position: F) -> Option<(&'a T, f64)>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Coordinates,
{
    let mut best: Option<(&'a T, f64)> = None;

    for item in items {
        let distance = distance_km(center, position(item));
        match best {
            Some((_, min_distance)) if distance >= min_distance => {}
            _ => best = Some((item, distance)),
        }
    }

    best
}
