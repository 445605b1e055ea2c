use std::fmt::Display;
use thiserror::Error;

/// A GPS fix in degrees, with the altitude in meters.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64, // In meters
}

impl GeoCoordinate {
    /// Creates a coordinate, rejecting latitudes outside [-90, 90], longitudes outside [-180, 180] and non-finite values.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }

        if !altitude.is_finite() {
            return Err(CoordinateError::Altitude(altitude));
        }

        Ok(GeoCoordinate {
            latitude,
            longitude,
            altitude,
        })
    }
}

impl Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[derive(Error, PartialEq, Debug)]
pub enum CoordinateError {
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    Latitude(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    Longitude(f64),
    #[error("invalid altitude: {0}, must be finite")]
    Altitude(f64),
}
