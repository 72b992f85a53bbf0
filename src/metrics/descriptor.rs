//! Metric descriptors
//!
//! A descriptor pairs a metric identity (name, help, label schema, kind)
//! with the readers that compute its samples.

use std::collections::{HashMap, HashSet};
use std::fmt;

use prometheus::core::Desc;

use super::traits::ValueReader;
use crate::errors::{ExporterError, Result};

/// Value semantics of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Can go up and down
    Gauge,
    /// Monotonically non-decreasing cumulative total
    Counter,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity metadata of a metric, without values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorInfo {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
    pub kind: ValueKind,
}

/// One computed sample
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub kind: ValueKind,
    pub value: f64,
    /// `(label name, label value)` pairs in schema order
    pub labels: Vec<(String, String)>,
}

impl Sample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, value)| value.as_str())
    }
}

pub struct MetricDescriptor {
    info: DescriptorInfo,
    desc: Desc,
    readers: Vec<Box<dyn ValueReader>>,
}

impl MetricDescriptor {
    /// Build a descriptor.
    ///
    /// Fails if the name or label names are not valid Prometheus identifiers,
    /// if a reader's label arity differs from `label_names`, or if two
    /// readers report the same label values.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        label_names: Vec<String>,
        kind: ValueKind,
        readers: Vec<Box<dyn ValueReader>>,
    ) -> Result<Self> {
        let name = name.into();
        let help = help.into();

        let mut seen = HashSet::new();
        for (index, reader) in readers.iter().enumerate() {
            let values = reader.read_label_values();
            if values.len() != label_names.len() {
                return Err(ExporterError::descriptor(format!(
                    "reader #{} of '{}' has {} label values, expected {} ({:?})",
                    index,
                    name,
                    values.len(),
                    label_names.len(),
                    label_names
                )));
            }
            if !seen.insert(values.to_vec()) {
                return Err(ExporterError::descriptor(format!(
                    "duplicate label values {:?} in '{}'",
                    values, name
                )));
            }
        }

        let desc = Desc::new(name.clone(), help.clone(), label_names.clone(), HashMap::new())
            .map_err(|e| ExporterError::descriptor(format!("invalid metric '{}': {}", name, e)))?;

        Ok(Self {
            info: DescriptorInfo {
                name,
                help,
                label_names,
                kind,
            },
            desc,
            readers,
        })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn kind(&self) -> ValueKind {
        self.info.kind
    }

    pub fn label_names(&self) -> &[String] {
        &self.info.label_names
    }

    pub fn info(&self) -> &DescriptorInfo {
        &self.info
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn readers(&self) -> &[Box<dyn ValueReader>] {
        &self.readers
    }

    /// Read every bound reader once, in order.
    pub fn samples(&self) -> Vec<Sample> {
        self.readers
            .iter()
            .map(|reader| Sample {
                name: self.info.name.clone(),
                kind: self.info.kind,
                value: reader.read_number(),
                labels: self
                    .info
                    .label_names
                    .iter()
                    .cloned()
                    .zip(reader.read_label_values().iter().cloned())
                    .collect(),
            })
            .collect()
    }
}

impl fmt::Debug for MetricDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDescriptor")
            .field("info", &self.info)
            .field("readers", &self.readers.len())
            .finish()
    }
}
