use crate::domain::LocationSample;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A source of GPS fixes, e.g. the device location service.
#[async_trait]
pub trait LocationProvider: Debug + Send + Sync {
    fn is_enabled_by_user(&self) -> bool;

    /// Starts the service. Accuracy and update distance are hints in meters.
    async fn start(&self, desired_accuracy_m: f64, update_distance_m: f64) -> Result<(), LocationError>;

    /// Returns the latest reading, which only carries a fix while the service is running.
    async fn last_sample(&self) -> LocationSample;

    async fn stop(&self);
}

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location services are not enabled")]
    Disabled,
    #[error("could not read track '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("could not parse track '{}': {}", path.display(), source)]
    Parse { source: serde_json::Error, path: PathBuf },
    #[error("track '{}' contains no coordinates", path.display())]
    EmptyTrack { path: PathBuf },
}
