use std::fmt::Display;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MarkerKind {
    CurrentLocation,
    Destination,
}

impl MarkerKind {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerKind::CurrentLocation => "CurrentLocationGhost",
            MarkerKind::Destination => "DestinationGhost",
        }
    }
}

impl Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
