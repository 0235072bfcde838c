use anyhow::anyhow;
use tracing_subscriber::EnvFilter;


/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| anyhow!("Could not install tracing subscriber: {e}"))
}
