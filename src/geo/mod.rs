//! Pure geodesy used to place markers: an equirectangular projection around an origin and the haversine distance.
//!
//! Both functions only read their arguments, so they can be called from any task without synchronisation.

mod distance;
mod projector;

pub use distance::haversine_distance;
pub use projector::project;
