use crate::domain::GeoCoordinate;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    tracking: Tracking,
    origin: Origin,
    replay: Replay,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn tracking(&self) -> &Tracking {
        &self.tracking
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Tracking {
    enabled: bool,
    #[serde(with = "humantime_serde")]
    update_interval: Duration,
    desired_accuracy_m: f64,
    update_distance_m: f64,
}

impl Tracking {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn desired_accuracy_m(&self) -> f64 {
        self.desired_accuracy_m
    }

    pub fn update_distance_m(&self) -> f64 {
        self.update_distance_m
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    /// Pin the origin to the first running fix of the session.
    FirstFix,
    /// Use the configured location.
    Fixed,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawOrigin")]
pub struct Origin {
    mode: OriginMode,
    location: Option<GeoCoordinate>,
}

#[derive(Deserialize)]
struct RawOrigin {
    mode: OriginMode,
    location: Option<GeoCoordinate>,
}

impl TryFrom<RawOrigin> for Origin {
    type Error = OriginError;

    fn try_from(raw: RawOrigin) -> Result<Self, Self::Error> {
        if raw.mode == OriginMode::Fixed && raw.location.is_none() {
            return Err(OriginError::MissingLocation);
        }

        Ok(Origin {
            mode: raw.mode,
            location: raw.location,
        })
    }
}

#[derive(Error, Debug)]
pub enum OriginError {
    #[error("origin.location is required when origin.mode is 'fixed'")]
    MissingLocation,
}

impl Origin {
    pub fn mode(&self) -> OriginMode {
        self.mode
    }

    pub fn location(&self) -> Option<GeoCoordinate> {
        self.location
    }
}

#[derive(Debug, Deserialize)]
pub struct Replay {
    track_file: String,
    #[serde(default)]
    warmup_reads: usize,
    fail_after: Option<usize>,
}

impl Replay {
    pub fn track_file(&self) -> &str {
        &self.track_file
    }

    pub fn warmup_reads(&self) -> usize {
        self.warmup_reads
    }

    pub fn fail_after(&self) -> Option<usize> {
        self.fail_after
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { event_buffer_size: 8 },
                tracking: Tracking {
                    enabled: true,
                    update_interval: Duration::from_millis(500),
                    desired_accuracy_m: 1.0,
                    update_distance_m: 0.1,
                },
                origin: Origin {
                    mode: OriginMode::FirstFix,
                    location: None,
                },
                replay: Replay {
                    track_file: "tracks/delft.json".to_string(),
                    warmup_reads: 0,
                    fail_after: None,
                },
            },
        }
    }

    pub fn fixed_origin(mut self, location: GeoCoordinate) -> Self {
        self.config.origin = Origin {
            mode: OriginMode::Fixed,
            location: Some(location),
        };
        self
    }

    pub fn tracking_enabled(mut self, enabled: bool) -> Self {
        self.config.tracking.enabled = enabled;
        self
    }

    pub fn track_file(mut self, track_file: &str) -> Self {
        self.config.replay.track_file = track_file.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
