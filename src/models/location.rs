// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map locations and the placeholder address format.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Default map centre (Thiruvananthapuram).
pub const DEFAULT_CENTER: (f64, f64) = (8.5241, 76.9366);

/// A point on the map with a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Location {
    /// Build a location with an explicit address (seed data).
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }

    /// Build a location from raw coordinates.
    ///
    /// There is no reverse geocoding; the address is the coordinates
    /// rounded to four decimal places.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Longitude(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
            address: placeholder_address(latitude, longitude),
        })
    }

    /// Geo point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Format coordinates the way a map click labels them.
pub fn placeholder_address(latitude: f64, longitude: f64) -> String {
    format!("{:.4}, {:.4}", latitude, longitude)
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LocationError {
    #[error("Latitude out of range: {0}")]
    Latitude(f64),

    #[error("Longitude out of range: {0}")]
    Longitude(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_address_rounds_to_four_places() {
        assert_eq!(placeholder_address(8.524149, 76.93661), "8.5241, 76.9366");
        assert_eq!(placeholder_address(-1.0, 2.5), "-1.0000, 2.5000");
    }

    #[test]
    fn test_from_coordinates_rejects_out_of_range() {
        assert_eq!(
            Location::from_coordinates(91.0, 0.0),
            Err(LocationError::Latitude(91.0))
        );
        assert_eq!(
            Location::from_coordinates(0.0, -180.5),
            Err(LocationError::Longitude(-180.5))
        );
        assert!(Location::from_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_point_uses_lng_lat_order() {
        let loc = Location::from_coordinates(8.5, 76.9).unwrap();
        assert_eq!(loc.point().x(), 76.9);
        assert_eq!(loc.point().y(), 8.5);
    }
}
