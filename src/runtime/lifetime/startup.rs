use anyhow::{Context, Result};
use prometheus::Registry;
use tracing::{debug, info};

use crate::config::CollectorConfig;
use crate::metrics::{SourcePaths, container_metrics};

/// Discover sources and build the registry served by the HTTP layer.
pub fn prepare_registry(paths: &SourcePaths, collector: &CollectorConfig) -> Result<Registry> {
    let start_time = std::time::Instant::now();
    debug!(
        "Reading cgroup from {} and interfaces from {}",
        paths.cgroup_root.display(),
        paths.net_root.display()
    );

    let aggregator = container_metrics(paths, collector.read_timeout())
        .context("Failed to build container metrics")?;
    let metric_count = aggregator.descriptors().len();
    let registry = aggregator
        .into_registry()
        .context("Failed to register container metrics")?;

    info!(
        "Registered {} metrics in {} ms",
        metric_count,
        start_time.elapsed().as_millis()
    );
    Ok(registry)
}
