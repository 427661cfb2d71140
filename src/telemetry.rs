//! Logging setup for the binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "toroidal_life=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {}", err))
}
