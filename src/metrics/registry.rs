//! Metric aggregation and Prometheus export
//!
//! [`MetricAggregator`] owns every descriptor and implements
//! [`prometheus::core::Collector`], so a scrape of the registry re-reads all
//! sources. Nothing is cached between scrapes.

use std::collections::HashSet;

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

use super::descriptor::{DescriptorInfo, MetricDescriptor, Sample, ValueKind};
use crate::errors::{ExporterError, Result};

/// Immutable set of metric descriptors, built once at startup
#[derive(Debug)]
pub struct MetricAggregator {
    descriptors: Vec<MetricDescriptor>,
}

impl MetricAggregator {
    /// Fails if two descriptors share a name.
    pub fn new(descriptors: Vec<MetricDescriptor>) -> Result<Self> {
        let mut names = HashSet::new();
        for descriptor in &descriptors {
            if !names.insert(descriptor.name()) {
                return Err(ExporterError::descriptor(format!(
                    "metric '{}' is declared more than once",
                    descriptor.name()
                )));
            }
        }
        Ok(Self { descriptors })
    }

    pub fn descriptors(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    /// Identity metadata of every metric, in declaration order.
    pub fn describe(&self) -> Vec<DescriptorInfo> {
        self.descriptors.iter().map(|d| d.info().clone()).collect()
    }

    /// Fresh samples from every reader of every descriptor.
    pub fn collect_samples(&self) -> Vec<Sample> {
        self.descriptors
            .iter()
            .flat_map(MetricDescriptor::samples)
            .collect()
    }

    /// Register this aggregator in a new registry.
    pub fn into_registry(self) -> Result<Registry> {
        let registry = Registry::new();
        registry.register(Box::new(self))?;
        Ok(registry)
    }
}

impl Collector for MetricAggregator {
    fn desc(&self) -> Vec<&Desc> {
        self.descriptors.iter().map(MetricDescriptor::desc).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = Vec::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            // Descriptors without readers (no interfaces found) publish nothing
            if descriptor.readers().is_empty() {
                continue;
            }
            match metric_families(descriptor) {
                Ok(mut collected) => families.append(&mut collected),
                Err(e) => warn!("Failed to collect '{}': {}", descriptor.name(), e),
            }
        }
        families
    }
}

fn metric_families(descriptor: &MetricDescriptor) -> prometheus::Result<Vec<MetricFamily>> {
    let opts = Opts::new(descriptor.name(), descriptor.info().help.clone());
    let label_names: Vec<&str> = descriptor
        .label_names()
        .iter()
        .map(String::as_str)
        .collect();

    match descriptor.kind() {
        ValueKind::Gauge => {
            let gauges = GaugeVec::new(opts, &label_names)?;
            for sample in descriptor.samples() {
                gauges
                    .with_label_values(&label_values(&sample))
                    .set(sample.value);
            }
            Ok(gauges.collect())
        }
        ValueKind::Counter => {
            let counters = CounterVec::new(opts, &label_names)?;
            for sample in descriptor.samples() {
                // Counters reject negative increments
                counters
                    .with_label_values(&label_values(&sample))
                    .inc_by(sample.value.max(0.0));
            }
            Ok(counters.collect())
        }
    }
}

fn label_values(sample: &Sample) -> Vec<&str> {
    sample.labels.iter().map(|(_, value)| value.as_str()).collect()
}

/// Export a registry in Prometheus text format
pub fn export(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ExporterError::encode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ExporterError::encode(e.to_string()))
}
