use crate::domain::GeoCoordinate;

/// Mean Earth radius of the spherical model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Returns the great-circle surface distance in meters between `a` and `b`, see <https://en.wikipedia.org/wiki/Haversine_formula>.
///
/// Altitude is ignored.
#[must_use]
pub fn haversine_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
