use crate::domain::GeoCoordinate;
use chrono::{DateTime, Utc};
use std::fmt::Display;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocationStatus {
    Stopped,
    Initializing,
    Running,
    Failed,
}

impl Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocationStatus::Stopped => "stopped",
            LocationStatus::Initializing => "initializing",
            LocationStatus::Running => "running",
            LocationStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// A single read of the location service.
#[derive(Clone, PartialEq, Debug)]
pub struct LocationSample {
    pub status: LocationStatus,
    pub coordinate: Option<GeoCoordinate>,
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn running(coordinate: GeoCoordinate) -> Self {
        LocationSample {
            status: LocationStatus::Running,
            coordinate: Some(coordinate),
            timestamp: Utc::now(),
        }
    }

    pub fn without_fix(status: LocationStatus) -> Self {
        LocationSample {
            status,
            coordinate: None,
            timestamp: Utc::now(),
        }
    }

    /// Returns the coordinate only when the service is running, a stale reading is never a fix.
    pub fn fix(&self) -> Option<GeoCoordinate> {
        match self.status {
            LocationStatus::Running => self.coordinate,
            _ => None,
        }
    }
}
