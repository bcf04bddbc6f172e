//! Warden gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p warden-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use tracing::{error, info};
use warden_common::{try_init_tracing, AppConfig};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Warden failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Warden...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        guild_id = %config.guild_id,
        port = config.server.port,
        divorce_policy = ?config.divorce_policy,
        registration = config.registration.is_some(),
        "Configuration loaded"
    );

    // Run the gateway server
    warden_gateway::run(config).await?;

    Ok(())
}
