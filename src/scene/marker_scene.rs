use crate::domain::{LocalOffset, MarkerKind};
use crate::scene::Readout;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Positions markers in the camera view and shows the readout next to it.
#[async_trait]
pub trait MarkerScene: Debug + Send + Sync {
    async fn place_marker(&self, kind: MarkerKind, offset: LocalOffset, label: &str);

    async fn show_readout(&self, readout: &Readout);
}

/// A scene without a view, placements and readouts are logged instead.
#[derive(Default, Debug)]
pub struct TracingScene {
    markers: Mutex<HashMap<MarkerKind, LocalOffset>>,
    readout: Mutex<Option<Readout>>,
}

impl TracingScene {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn marker(&self, kind: MarkerKind) -> Option<LocalOffset> {
        self.markers.lock().await.get(&kind).copied()
    }
}

#[async_trait]
impl MarkerScene for TracingScene {
    async fn place_marker(&self, kind: MarkerKind, offset: LocalOffset, label: &str) {
        let mut markers = self.markers.lock().await;
        match markers.insert(kind, offset) {
            None => info!(marker = kind.name(), "👻 Spawned '{}' at {} labelled {}", kind, offset, label),
            Some(previous) if previous != offset => debug!(marker = kind.name(), "👻 Moved '{}' to {}", kind, offset),
            Some(_) => {}
        }
    }

    async fn show_readout(&self, readout: &Readout) {
        let mut last = self.readout.lock().await;
        if last.as_ref() == Some(readout) {
            return;
        }

        info!("📟 {}", readout.lines().collect::<Vec<_>>().join(" | "));
        *last = Some(readout.clone());
    }
}
