mod marker_scene;
mod readout;

pub use marker_scene::{MarkerScene, TracingScene};
pub use readout::Readout;
