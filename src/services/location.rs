// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Device geolocation abstraction.

use crate::error::GeolocationUnavailable;
use crate::models::Location;

/// Source of the device's current coordinates.
pub trait Geolocator {
    /// Current `(latitude, longitude)`.
    fn current_position(&self) -> Result<(f64, f64), GeolocationUnavailable>;
}

/// Geolocator that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geolocator for FixedPosition {
    fn current_position(&self) -> Result<(f64, f64), GeolocationUnavailable> {
        Ok((self.latitude, self.longitude))
    }
}

/// Geolocator for devices without the capability or without permission.
#[derive(Debug, Clone)]
pub struct Unavailable(pub String);

impl Geolocator for Unavailable {
    fn current_position(&self) -> Result<(f64, f64), GeolocationUnavailable> {
        Err(GeolocationUnavailable {
            reason: self.0.clone(),
        })
    }
}

/// Resolve the device position into a map location.
pub fn locate(geolocator: &impl Geolocator) -> Result<Location, GeolocationUnavailable> {
    let (lat, lng) = geolocator.current_position()?;
    Location::from_coordinates(lat, lng).map_err(|e| {
        tracing::warn!(error = %e, "Geolocation returned invalid coordinates");
        GeolocationUnavailable {
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_formats_address() {
        let loc = locate(&FixedPosition {
            latitude: 8.52412,
            longitude: 76.93659,
        })
        .unwrap();
        assert_eq!(loc.address, "8.5241, 76.9366");
    }

    #[test]
    fn test_locate_reports_unavailable() {
        let err = locate(&Unavailable("permission denied".to_string())).unwrap_err();
        assert_eq!(err.reason, "permission denied");

        let err = locate(&FixedPosition {
            latitude: 200.0,
            longitude: 0.0,
        })
        .unwrap_err();
        assert!(err.reason.contains("Latitude"));
    }
}
