//! Sunrise and sunset derived from coordinates

use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates as SolarCoordinates, SolarDay, SolarEvent};

use crate::error::SkycastError;
use crate::models::Coordinates;
use crate::Result;

/// Compute sunrise and sunset (UTC) for a location on a given date
pub fn sunrise_sunset(
    coordinates: Coordinates,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let solar_coordinates = SolarCoordinates::new(coordinates.latitude, coordinates.longitude)
        .ok_or_else(|| {
            SkycastError::validation(format!(
                "Invalid coordinates: lat={}, lng={}",
                coordinates.latitude, coordinates.longitude
            ))
        })?;

    let solar_day = SolarDay::new(solar_coordinates, date);

    let sunrise = solar_day.event_time(SolarEvent::Sunrise);

    let sunset = solar_day.event_time(SolarEvent::Sunset);

    Ok((sunrise, sunset))
}
