mod provider;
mod replay_provider;

pub use provider::{LocationError, LocationProvider};
pub use replay_provider::ReplayProvider;
