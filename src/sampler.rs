use crate::domain::events::Event;
use crate::location::LocationProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, info, instrument, trace};

/// Reads the provider every `period` and forwards each sample to the store, until the store goes away.
#[instrument(skip_all, fields(period = ?period))]
pub async fn sampler(provider: Arc<dyn LocationProvider>, period: Duration, tx: Sender<Event>) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks = IntervalStream::new(timer);

    info!("📡 Sampling location every {:?}", period);
    while ticks.next().await.is_some() {
        let sample = provider.last_sample().await;
        trace!(status = %sample.status, at = %sample.timestamp, "📡 Sampled {:?}", sample.coordinate);

        if tx.send(Event::LocationSampled(sample)).await.is_err() {
            debug!("📡 Store closed, stopping sampler");
            break;
        }
    }
}
