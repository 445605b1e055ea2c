use crate::domain::{GeoCoordinate, LocalOffset};

/// Approximate length of one degree of latitude, WGS84 ellipsoidal variation is ignored.
pub const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// Projects `target` onto the ground plane around `origin` using an equirectangular approximation.
///
/// Longitude differences are scaled by the cosine of the origin latitude to account for meridian convergence.
/// Near the poles that factor approaches zero and longitude resolution collapses, this is not handled specially.
/// Altitude is not projected, the vertical axis is always zero so markers sit on the ground plane.
#[must_use]
pub fn project(origin: &GeoCoordinate, target: &GeoCoordinate) -> LocalOffset {
    let lat_diff_meters = (target.latitude - origin.latitude) * METERS_PER_DEGREE_LAT;
    let lon_diff_meters = (target.longitude - origin.longitude) * METERS_PER_DEGREE_LAT * origin.latitude.to_radians().cos();

    LocalOffset::new(lon_diff_meters, 0.0, lat_diff_meters)
}
