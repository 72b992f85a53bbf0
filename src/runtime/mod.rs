//! Application lifecycle
//!
//! - `lifetime`: startup wiring
//! - `modes`: the HTTP server

pub mod lifetime;
pub mod modes;

use anyhow::Result;

use crate::config::StaticConfig;
use crate::metrics::SourcePaths;

/// Build the registry from the host sources and serve it.
pub async fn run(config: StaticConfig) -> Result<()> {
    let registry = lifetime::prepare_registry(&SourcePaths::default(), &config.collector)?;
    modes::run_server(&config.server, registry).await?;
    Ok(())
}
