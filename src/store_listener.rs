use crate::domain::MarkerKind;
use crate::scene::{MarkerScene, Readout};
use crate::store::{Session, StoreSnapshot};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::instrument;

#[instrument(skip_all)]
pub async fn store_listener(mut rx: Receiver<StoreSnapshot>, scene: Arc<dyn MarkerScene>) {
    while rx.changed().await.is_ok() {
        let snapshot: StoreSnapshot = rx.borrow_and_update().clone();
        render(&snapshot, scene.as_ref()).await;
    }
}

async fn render(session: &Session, scene: &dyn MarkerScene) {
    let markers = [
        (MarkerKind::CurrentLocation, session.current_marker, session.current),
        (MarkerKind::Destination, session.destination_marker, session.stored),
    ];

    for (kind, offset, coordinate) in markers {
        if let (Some(offset), Some(coordinate)) = (offset, coordinate) {
            scene.place_marker(kind, offset, &coordinate.to_string()).await;
        }
    }

    scene.show_readout(&Readout::from_session(session)).await;
}
