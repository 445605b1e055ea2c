pub mod events;
mod geo_coordinate;
mod local_offset;
mod location_sample;
mod marker;

pub use geo_coordinate::{CoordinateError, GeoCoordinate};
pub use local_offset::LocalOffset;
pub use location_sample::{LocationSample, LocationStatus};
pub use marker::MarkerKind;
