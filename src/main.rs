//! Shard Cache - A sharded in-memory object cache
//!
//! Reads JSON commands from stdin, one per line, and answers each on stdout.

use std::io;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shard_cache::{driver, Config, Session};

/// Main entry point for the shard cache driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the sharded cache
/// 4. Process commands until stdin closes
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shard_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Shard Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: shard_count={}, shard_capacity={}, default_policy={}",
        config.shard_count, config.shard_capacity, config.default_policy
    );

    let mut session = Session::from_config(&config).context("failed to build cache")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = driver::run(&mut session, stdin.lock(), stdout.lock())
        .context("command stream failed")?;

    debug!("Final cache state:\n{}", session.cache());
    info!("Shutdown complete after {} commands", handled);
    Ok(())
}
