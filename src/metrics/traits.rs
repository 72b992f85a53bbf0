//! ValueReader trait for metric value sources
//!
//! A reader produces one numeric value and the label values it is reported
//! under. Readers are re-evaluated on every scrape, so implementations must
//! not cache results between calls.

/// Source of a single metric sample.
///
/// Implementations must be thread-safe (Send + Sync) because concurrent
/// scrapes call the same reader in parallel.
pub trait ValueReader: Send + Sync {
    /// Current value of the source.
    ///
    /// Never fails: a source that cannot be read reports `0.0`.
    fn read_number(&self) -> f64;

    /// Label values bound to this reader, in label-name order.
    fn read_label_values(&self) -> &[String];
}

/// Reader that always reports the same value.
///
/// Useful for tests and for metrics whose value is known at startup.
#[derive(Debug, Clone)]
pub struct ConstantReader {
    value: f64,
    label_values: Vec<String>,
}

impl ConstantReader {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label_values: Vec::new(),
        }
    }

    pub fn with_labels<I, S>(mut self, label_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_values = label_values.into_iter().map(Into::into).collect();
        self
    }
}

impl ValueReader for ConstantReader {
    fn read_number(&self) -> f64 {
        self.value
    }

    fn read_label_values(&self) -> &[String] {
        &self.label_values
    }
}
