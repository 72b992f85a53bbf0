//! Container metrics
//!
//! Declares metrics separately from the readers that compute their values,
//! and exposes them through a Prometheus registry.
//!
//! # Layout
//! - `traits`: the [`ValueReader`] capability
//! - `reader`: file-backed reader for cgroup and sysfs counters
//! - `interfaces`: startup-time network interface discovery
//! - `descriptor`: metric identity bound to its readers
//! - `registry`: aggregation and Prometheus export
//! - `system`: the concrete container metric set

pub mod descriptor;
pub mod interfaces;
pub mod reader;
mod registry;
pub mod system;
pub mod traits;

pub use descriptor::{DescriptorInfo, MetricDescriptor, Sample, ValueKind};
pub use interfaces::enumerate_interfaces;
pub use reader::{DEFAULT_READ_TIMEOUT, NumericFileReader};
pub use registry::{MetricAggregator, export};
pub use system::{Direction, SourcePaths, container_metrics};
pub use traits::{ConstantReader, ValueReader};
