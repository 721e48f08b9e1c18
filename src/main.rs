//! Kalaha agent runner.
//!
//! Connects to the configured game server, plays one game to its end, and
//! reports the outcome. Configuration comes from the environment:
//! `KALAHA_HOST`, `KALAHA_PORT`, `KALAHA_DEPTH`, `KALAHA_POLL_MS`,
//! `KALAHA_READ_TIMEOUT_MS`.

use anyhow::Result;
use tracing::{error, info};

use kalaha_agent::{ClientConfig, GameOutcome, ProtocolClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env();

    // A connect failure is fatal to startup and propagates; everything
    // after that point ends the session with a disconnect notice instead.
    let mut client = ProtocolClient::connect(config).await?;

    match client.run().await {
        Ok(GameOutcome::Win) => info!("session over: won"),
        Ok(GameOutcome::Loss) => info!("session over: lost"),
        Ok(GameOutcome::Draw) => info!("session over: even game"),
        Err(err) => {
            error!(%err, "session aborted, disconnecting");
            client.shutdown().await;
        }
    }

    Ok(())
}
