//! Container metric wiring
//!
//! Builds the four container metrics from cgroup v1 and sysfs sources:
//! memory usage, CPU time, and per-interface transmit/receive bytes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use super::descriptor::{MetricDescriptor, ValueKind};
use super::interfaces::{SYS_CLASS_NET, enumerate_interfaces};
use super::reader::NumericFileReader;
use super::registry::MetricAggregator;
use super::traits::ValueReader;
use crate::errors::Result;

/// Default cgroup v1 mount point
pub const SYS_FS_CGROUP: &str = "/sys/fs/cgroup";

pub const MEMORY_USAGE_BYTES: &str = "container_memory_usage_bytes";
pub const CPU_USAGE_SECONDS_TOTAL: &str = "container_cpu_usage_seconds_total";
pub const NETWORK_TRANSMIT_BYTES_TOTAL: &str = "container_network_transmit_bytes_total";
pub const NETWORK_RECEIVE_BYTES_TOTAL: &str = "container_network_receive_bytes_total";

/// Label carrying the interface name on network metrics
pub const INTERFACE_LABEL: &str = "interface";

/// cpuacct.usage is reported in nanoseconds
const NANOS_PER_SECOND: f64 = 1e9;

/// Roots of the virtual filesystems the exporter reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub cgroup_root: PathBuf,
    pub net_root: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            cgroup_root: PathBuf::from(SYS_FS_CGROUP),
            net_root: PathBuf::from(SYS_CLASS_NET),
        }
    }
}

impl SourcePaths {
    /// Same layout as the host, relocated under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            cgroup_root: root.join("sys/fs/cgroup"),
            net_root: root.join("sys/class/net"),
        }
    }

    pub fn memory_usage(&self) -> PathBuf {
        self.cgroup_root.join("memory/memory.usage_in_bytes")
    }

    pub fn cpu_usage(&self) -> PathBuf {
        self.cgroup_root.join("cpu,cpuacct/cpuacct.usage")
    }

    pub fn interface_bytes(&self, interface: &str, direction: Direction) -> PathBuf {
        self.net_root
            .join(interface)
            .join("statistics")
            .join(format!("{}_bytes", direction.prefix()))
    }
}

/// Traffic direction of a network counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Transmit,
    Receive,
}

impl Direction {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Transmit => "tx",
            Self::Receive => "rx",
        }
    }

    fn metric_name(&self) -> &'static str {
        match self {
            Self::Transmit => NETWORK_TRANSMIT_BYTES_TOTAL,
            Self::Receive => NETWORK_RECEIVE_BYTES_TOTAL,
        }
    }

    fn help(&self) -> &'static str {
        match self {
            Self::Transmit => "Cumulative count of bytes transmitted",
            Self::Receive => "Cumulative count of bytes received",
        }
    }
}

/// Discover interfaces and assemble all container metrics.
///
/// Should be called once during startup; the interface set is fixed from
/// then on.
pub fn container_metrics(paths: &SourcePaths, read_timeout: Duration) -> Result<MetricAggregator> {
    let interfaces = enumerate_interfaces(&paths.net_root);
    info!(
        "Discovered {} network interfaces: {:?}",
        interfaces.len(),
        interfaces
    );

    let memory: Vec<Box<dyn ValueReader>> = vec![Box::new(
        NumericFileReader::new(paths.memory_usage()).with_timeout(read_timeout),
    )];
    let cpu: Vec<Box<dyn ValueReader>> = vec![Box::new(
        NumericFileReader::new(paths.cpu_usage())
            .with_divisor(NANOS_PER_SECOND)
            .with_timeout(read_timeout),
    )];

    let descriptors = vec![
        MetricDescriptor::new(
            MEMORY_USAGE_BYTES,
            "Current memory usage in bytes",
            Vec::new(),
            ValueKind::Gauge,
            memory,
        )?,
        MetricDescriptor::new(
            CPU_USAGE_SECONDS_TOTAL,
            "Cumulative cpu time consumed in seconds",
            Vec::new(),
            ValueKind::Counter,
            cpu,
        )?,
        network_metric(paths, &interfaces, Direction::Transmit, read_timeout)?,
        network_metric(paths, &interfaces, Direction::Receive, read_timeout)?,
    ];

    MetricAggregator::new(descriptors)
}

fn network_metric(
    paths: &SourcePaths,
    interfaces: &[String],
    direction: Direction,
    read_timeout: Duration,
) -> Result<MetricDescriptor> {
    let readers: Vec<Box<dyn ValueReader>> = interfaces
        .iter()
        .map(|interface| {
            let reader = NumericFileReader::new(paths.interface_bytes(interface, direction))
                .with_labels([interface.as_str()])
                .with_timeout(read_timeout);
            debug!(
                "Binding {} to {}",
                direction.metric_name(),
                reader.path().display()
            );
            Box::new(reader) as Box<dyn ValueReader>
        })
        .collect();

    MetricDescriptor::new(
        direction.metric_name(),
        direction.help(),
        vec![INTERFACE_LABEL.to_string()],
        ValueKind::Counter,
        readers,
    )
}
