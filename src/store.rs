use crate::app_config::{Origin, OriginMode};
use crate::domain::events::Event;
use crate::domain::{GeoCoordinate, LocalOffset, LocationSample, LocationStatus};
use crate::geo;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

pub type StoreSnapshot = Arc<Session>;

const TRACKING_ACTIVE: &str = "Location tracking active";
const INITIALIZING: &str = "Initializing location services...";
const FAILED: &str = "Location services failed";
const STORED: &str = "Location stored successfully";

/// Everything known about the current tracking session. Marker offsets are derived from the origin and never stored on their own.
#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    pub status: LocationStatus,
    pub status_text: String,
    pub origin: Option<GeoCoordinate>,
    pub current: Option<GeoCoordinate>,
    pub stored: Option<GeoCoordinate>,
    pub current_marker: Option<LocalOffset>,
    pub destination_marker: Option<LocalOffset>,
    pub distance_m: Option<f64>,
}

impl Session {
    fn new(origin: Option<GeoCoordinate>) -> Self {
        Session {
            status: LocationStatus::Initializing,
            status_text: INITIALIZING.to_string(),
            origin,
            current: None,
            stored: None,
            current_marker: None,
            destination_marker: None,
            distance_m: None,
        }
    }

    fn is_running(&self) -> bool {
        self.status == LocationStatus::Running
    }

    fn project_markers(&mut self) {
        let Some(origin) = self.origin else {
            return;
        };

        self.current_marker = self.current.map(|current| geo::project(&origin, &current));
        self.destination_marker = self.stored.map(|stored| geo::project(&origin, &stored));
    }
}

#[derive(Debug)]
pub struct Store {
    session: Session,
    origin_mode: OriginMode,
    last_fix_at: Option<DateTime<Utc>>,
    rx: Receiver<Event>,
    notifier_tx: WatchSender<StoreSnapshot>,
    notifier_rx: WatchReceiver<StoreSnapshot>,
}

impl Store {
    /// In `Fixed` mode the configured location is the projection origin for the whole session, otherwise the first fix is.
    pub fn new(rx: Receiver<Event>, origin: &Origin) -> Self {
        let origin_mode = origin.mode();
        let session = Session::new(match origin_mode {
            OriginMode::Fixed => origin.location(),
            OriginMode::FirstFix => None,
        });
        let (notifier_tx, notifier_rx) = watch::channel::<StoreSnapshot>(Arc::new(session.clone()));

        Store {
            session,
            origin_mode,
            last_fix_at: None,
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<StoreSnapshot> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            if self.apply(event) {
                self.notifier_tx.send(Arc::new(self.session.clone())).unwrap_or_default();
            }
        }
        debug!("🔵 Event channel closed");
    }

    /// Applies a single event, returns whether the session changed.
    fn apply(&mut self, event: Event) -> bool {
        let before = self.session.clone();

        match event {
            Event::LocationSampled(sample) => self.location_sampled(sample),
            Event::StoreCurrentLocation => self.store_current_location(),
            Event::CalculateDistance => self.calculate_distance(),
            Event::ResetOrigin => self.reset_origin(),
        }

        self.session != before
    }

    fn location_sampled(&mut self, sample: LocationSample) {
        if sample.status != self.session.status {
            match self.last_fix_at {
                Some(at) if self.session.is_running() => {
                    info!("🔵 Location service is {}, was {}, last fix at {}", sample.status, self.session.status, at)
                }
                _ => info!("🔵 Location service is {}, was {}", sample.status, self.session.status),
            }
        }

        self.session.status = sample.status;
        match sample.status {
            LocationStatus::Running => self.session.status_text = TRACKING_ACTIVE.to_string(),
            LocationStatus::Initializing => self.session.status_text = INITIALIZING.to_string(),
            LocationStatus::Failed => self.session.status_text = FAILED.to_string(),
            LocationStatus::Stopped => {}
        }

        let Some(fix) = sample.fix() else {
            return;
        };

        self.last_fix_at = Some(sample.timestamp);
        self.session.current = Some(fix);
        if self.session.origin.is_none() && self.origin_mode == OriginMode::FirstFix {
            info!("📍 Pinned origin to first fix {}", fix);
            self.session.origin = Some(fix);
        }
        self.session.project_markers();
    }

    fn store_current_location(&mut self) {
        let (true, Some(current)) = (self.session.is_running(), self.session.current) else {
            warn!("⚠️ Cannot store location, location service is {}", self.session.status);
            return;
        };

        self.session.stored = Some(current);
        self.session.project_markers();
        self.session.status_text = STORED.to_string();
        info!("📍 Stored location {}", current);
    }

    fn calculate_distance(&mut self) {
        if !self.session.is_running() {
            warn!("⚠️ Cannot calculate distance, location service is {}", self.session.status);
            return;
        }

        let (Some(stored), Some(current)) = (self.session.stored, self.session.current) else {
            warn!("⚠️ Cannot calculate distance, no location stored");
            return;
        };

        let distance_m = geo::haversine_distance(&stored, &current);
        self.session.distance_m = Some(distance_m);
        info!("📏 Distance from {} to {} is {:.2} m", stored, current, distance_m);
    }

    fn reset_origin(&mut self) {
        let (true, Some(current)) = (self.session.is_running(), self.session.current) else {
            warn!("⚠️ Cannot reset origin, location service is {}", self.session.status);
            return;
        };

        self.session.origin = Some(current);
        self.session.project_markers();
        info!("📍 Reset origin to {}", current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;
    use test_log::test;

    const DELFT: GeoCoordinate = GeoCoordinate {
        latitude: 52.0116,
        longitude: 4.3571,
        altitude: 2.0,
    };

    const NORTH_OF_DELFT: GeoCoordinate = GeoCoordinate {
        latitude: 52.0126,
        longitude: 4.3571,
        altitude: 2.0,
    };

    fn store(fixed_origin: Option<GeoCoordinate>) -> (mpsc::Sender<Event>, Store) {
        let config = match fixed_origin {
            Some(location) => AppConfigBuilder::new().fixed_origin(location).build(),
            None => AppConfigBuilder::new().build(),
        };
        let (tx, rx) = mpsc::channel(config.core().event_buffer_size());
        (tx, Store::new(rx, config.origin()))
    }

    fn sampled(coordinate: GeoCoordinate) -> Event {
        Event::LocationSampled(LocationSample::running(coordinate))
    }

    #[test]
    fn starts_initializing_without_markers() {
        let (_tx, store) = store(None);

        assert_eq!(store.session.status, LocationStatus::Initializing);
        assert_eq!(store.session.status_text, INITIALIZING);
        assert_eq!(store.session.current_marker, None);
    }

    #[test]
    fn first_fix_becomes_the_origin() {
        let (_tx, mut store) = store(None);

        assert!(store.apply(sampled(DELFT)));
        assert!(store.apply(sampled(NORTH_OF_DELFT)));

        assert_eq!(store.session.origin, Some(DELFT));
        assert_eq!(store.session.status_text, TRACKING_ACTIVE);

        let marker = store.session.current_marker.unwrap();
        assert_relative_eq!(marker.z, 111.0, epsilon = 1e-3);
        assert_relative_eq!(marker.x, 0.0);
        assert_eq!(marker.y, 0.0);
    }

    #[test]
    fn fixed_origin_is_kept() {
        let (_tx, mut store) = store(Some(NORTH_OF_DELFT));

        store.apply(sampled(DELFT));

        assert_eq!(store.session.origin, Some(NORTH_OF_DELFT));
        assert_relative_eq!(store.session.current_marker.unwrap().z, -111.0, epsilon = 1e-3);
    }

    #[test]
    fn samples_without_a_fix_only_update_the_status() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));

        store.apply(Event::LocationSampled(LocationSample::without_fix(LocationStatus::Failed)));

        assert_eq!(store.session.status, LocationStatus::Failed);
        assert_eq!(store.session.status_text, FAILED);
        assert_eq!(store.session.current, Some(DELFT));
    }

    #[test]
    fn remembers_when_the_last_fix_was_taken() {
        let (_tx, mut store) = store(None);
        let fix = LocationSample::running(DELFT);
        let taken_at = fix.timestamp;

        store.apply(Event::LocationSampled(fix));
        store.apply(Event::LocationSampled(LocationSample::without_fix(LocationStatus::Failed)));

        assert_eq!(store.last_fix_at, Some(taken_at));
    }

    #[test]
    fn unchanged_samples_do_not_change_the_session() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));

        assert!(!store.apply(sampled(DELFT)));
    }

    #[test]
    fn storing_places_the_destination_marker() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));
        store.apply(sampled(NORTH_OF_DELFT));

        assert!(store.apply(Event::StoreCurrentLocation));

        assert_eq!(store.session.stored, Some(NORTH_OF_DELFT));
        assert_eq!(store.session.status_text, STORED);
        assert_eq!(store.session.destination_marker, store.session.current_marker);
    }

    #[test]
    fn storing_is_ignored_until_running() {
        let (_tx, mut store) = store(None);
        store.apply(Event::LocationSampled(LocationSample::without_fix(LocationStatus::Initializing)));

        assert!(!store.apply(Event::StoreCurrentLocation));
        assert_eq!(store.session.stored, None);
    }

    #[test]
    fn calculates_the_distance_between_stored_and_current() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));
        store.apply(Event::StoreCurrentLocation);
        store.apply(sampled(NORTH_OF_DELFT));

        assert!(store.apply(Event::CalculateDistance));

        assert_relative_eq!(store.session.distance_m.unwrap(), 111.19, epsilon = 0.01);
    }

    #[test]
    fn distance_requires_a_stored_location() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));

        assert!(!store.apply(Event::CalculateDistance));
        assert_eq!(store.session.distance_m, None);
    }

    #[test]
    fn distance_requires_a_running_service() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));
        store.apply(Event::StoreCurrentLocation);
        store.apply(Event::LocationSampled(LocationSample::without_fix(LocationStatus::Failed)));

        assert!(!store.apply(Event::CalculateDistance));
    }

    #[test]
    fn resetting_the_origin_requires_a_running_service() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));
        store.apply(sampled(NORTH_OF_DELFT));
        store.apply(Event::LocationSampled(LocationSample::without_fix(LocationStatus::Failed)));

        assert!(!store.apply(Event::StoreCurrentLocation));
        assert!(!store.apply(Event::ResetOrigin));
        assert_eq!(store.session.origin, Some(DELFT));
    }

    #[test]
    fn resetting_the_origin_reprojects_all_markers() {
        let (_tx, mut store) = store(None);
        store.apply(sampled(DELFT));
        store.apply(Event::StoreCurrentLocation);
        store.apply(sampled(NORTH_OF_DELFT));

        assert!(store.apply(Event::ResetOrigin));

        assert_eq!(store.session.origin, Some(NORTH_OF_DELFT));
        assert_eq!(store.session.current_marker, Some(LocalOffset::default()));
        assert_relative_eq!(store.session.destination_marker.unwrap().z, -111.0, epsilon = 1e-3);
    }

    #[test(tokio::test)]
    async fn listen_publishes_snapshots() {
        let (tx, mut store) = store(None);
        let mut notifier = store.notifier();

        let handle = tokio::spawn(async move { store.listen().await });
        tx.send(sampled(DELFT)).await.unwrap();

        notifier.changed().await.unwrap();
        assert_eq!(notifier.borrow().current, Some(DELFT));

        drop(tx);
        handle.await.unwrap();
    }
}
