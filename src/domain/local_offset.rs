use std::fmt::Display;

/// Offset in meters from the projection origin: `x` points east, `z` points north and `y` is vertical.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct LocalOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        LocalOffset { x, y, z }
    }
}

impl Display for LocalOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
