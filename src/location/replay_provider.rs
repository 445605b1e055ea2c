use crate::app_config::{Replay, Tracking};
use crate::domain::{GeoCoordinate, LocationSample, LocationStatus};
use crate::location::{LocationError, LocationProvider};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Replays a recorded track, one point per read.
///
/// After `start` the first `warmup_reads` reads report `Initializing`, like a receiver waiting for its first fix.
/// Once the track is exhausted the last point is repeated.
#[derive(Debug)]
pub struct ReplayProvider {
    track: Vec<GeoCoordinate>,
    enabled: bool,
    warmup_reads: usize,
    fail_after: Option<usize>,
    state: Mutex<ReplayState>,
}

#[derive(Default, Debug)]
struct ReplayState {
    started: bool,
    reads: usize,
    fixes: usize,
}

impl ReplayProvider {
    pub fn new(track: Vec<GeoCoordinate>) -> Self {
        ReplayProvider {
            track,
            enabled: true,
            warmup_reads: 0,
            fail_after: None,
            state: Mutex::new(ReplayState::default()),
        }
    }

    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, LocationError> {
        info!("🛰️ Loading track...");
        let content = fs::read_to_string(path).await.map_err(|e| LocationError::Io {
            source: e,
            path: path.to_path_buf(),
        })?;

        let track: Vec<GeoCoordinate> = serde_json::from_str(&content).map_err(|e| LocationError::Parse {
            source: e,
            path: path.to_path_buf(),
        })?;

        if track.is_empty() {
            return Err(LocationError::EmptyTrack { path: path.to_path_buf() });
        }

        info!("🛰️ Loading track... OK, {} point(s)", track.len());
        Ok(Self::new(track))
    }

    /// Builds the provider from configuration. When tracking is disabled the track is not read at all.
    pub async fn from_config(tracking: &Tracking, replay: &Replay) -> Result<Self, LocationError> {
        if !tracking.enabled() {
            return Ok(Self::new(Vec::new()).with_enabled(false));
        }

        Ok(Self::load(Path::new(replay.track_file()))
            .await?
            .with_warmup_reads(replay.warmup_reads())
            .with_fail_after(replay.fail_after()))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_warmup_reads(mut self, warmup_reads: usize) -> Self {
        self.warmup_reads = warmup_reads;
        self
    }

    pub fn with_fail_after(mut self, fail_after: Option<usize>) -> Self {
        self.fail_after = fail_after;
        self
    }
}

#[async_trait]
impl LocationProvider for ReplayProvider {
    fn is_enabled_by_user(&self) -> bool {
        self.enabled
    }

    async fn start(&self, desired_accuracy_m: f64, update_distance_m: f64) -> Result<(), LocationError> {
        if !self.enabled {
            return Err(LocationError::Disabled);
        }

        let mut state = self.state.lock().await;
        *state = ReplayState {
            started: true,
            ..ReplayState::default()
        };
        debug!(desired_accuracy_m, update_distance_m, "🛰️ Started replaying {} point(s)", self.track.len());
        Ok(())
    }

    async fn last_sample(&self) -> LocationSample {
        let mut state = self.state.lock().await;
        if !state.started {
            return LocationSample::without_fix(LocationStatus::Stopped);
        }

        state.reads += 1;
        if state.reads <= self.warmup_reads {
            return LocationSample::without_fix(LocationStatus::Initializing);
        }

        if self.fail_after.is_some_and(|limit| state.fixes >= limit) {
            return LocationSample::without_fix(LocationStatus::Failed);
        }

        let Some(coordinate) = self.track.get(state.fixes).or(self.track.last()) else {
            return LocationSample::without_fix(LocationStatus::Failed);
        };

        state.fixes += 1;
        LocationSample::running(*coordinate)
    }

    async fn stop(&self) {
        self.state.lock().await.started = false;
        debug!("🛰️ Stopped replaying");
    }
}
