use crate::app_config::AppConfig;
use crate::console::{ConsoleExit, console};
use crate::domain::events::Event;
use crate::location::{LocationProvider, ReplayProvider};
use crate::sampler::sampler;
use crate::scene::TracingScene;
use crate::store::Store;
use crate::store_listener::store_listener;
use std::future;
use std::sync::Arc;
use tokio::io::{BufReader, stdin};
use tokio::sync::mpsc;
use tokio::{signal, task};
use tracing::{info, warn};

mod app_config;
mod console;
mod domain;
mod geo;
mod geo_coordinate_deserializer;
mod location;
mod sampler;
mod scene;
mod store;
mod store_listener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let tracking = config.tracking();
    let provider: Arc<dyn LocationProvider> = Arc::new(ReplayProvider::from_config(tracking, config.replay()).await?);

    if !provider.is_enabled_by_user() {
        warn!("⚠️ Location services not enabled");
        return Ok(());
    }

    provider.start(tracking.desired_accuracy_m(), tracking.update_distance_m()).await?;
    info!("✅  Initialized location services");

    let (tx, rx) = mpsc::channel::<Event>(config.core().event_buffer_size());
    let mut store = Store::new(rx, config.origin());
    let notifier_rx = store.notifier();

    task::spawn(async move {
        store_listener(notifier_rx, Arc::new(TracingScene::new())).await;
    });
    info!("✅  Initialized marker scene");

    task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized store");

    task::spawn(sampler(provider.clone(), tracking.update_interval(), tx.clone()));
    info!("✅  Initialized location sampler");

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    let session = async {
        if console(BufReader::new(stdin()), tx).await == ConsoleExit::EndOfInput {
            info!("⌨️ Input closed, press Ctrl-C to stop");
            future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = session => {}
        _ = signal::ctrl_c() => info!("🛑 Interrupted"),
    }

    provider.stop().await;
    info!("👋 Stopped location services");

    Ok(())
}
