//! UDP Cache client
//!
//! Authenticates against a running server and walks through one
//! SET / GET / DELETE / GET round, logging every reply.

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use udp_cache::{CacheClient, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "udp_cache=info,udp_cache_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    let client = CacheClient::connect(config.server_addr, config.timeout())
        .await
        .context("Failed to open client socket")?;
    info!("Talking to cache server at {}", client.server_addr());

    if !client.auth(&config.username, &config.password).await? {
        error!("Authentication failed for user '{}'", config.username);
        anyhow::bail!("authentication failed");
    }
    info!("Authenticated as '{}'", config.username);

    info!("SET key1 value1 -> {}", client.set("key1", "value1").await?);
    info!("GET key1 -> {}", client.get("key1").await?);
    info!("DELETE key1 -> {}", client.delete("key1").await?);
    info!("GET key1 -> {}", client.get("key1").await?);

    Ok(())
}
