//! Standalone signaling server
//!
//! Serves the room WebSocket endpoint from the default configuration
//! file (`signcall.toml`) or built-in defaults.

use anyhow::Result;
use signcall::config::SignCallConfig;
use signcall::signaling::{server, RoomRegistry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    signcall::init_logging();

    let config = SignCallConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;

    log::info!(
        "Starting {} v{} signaling server",
        signcall::NAME,
        signcall::VERSION
    );

    let registry = Arc::new(RoomRegistry::new());
    server::serve(&config.signaling, registry).await?;
    Ok(())
}
