use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initializes logging: INFO by default, overridable via `RUST_LOG`.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging init failed: {e}"))
}
