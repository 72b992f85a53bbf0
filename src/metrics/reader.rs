//! File-backed metric reader
//!
//! Reads a single number from a cgroup or sysfs file on every call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};
use tracing::debug;

use super::traits::ValueReader;

/// Default upper bound for a single file read.
///
/// Readers of one scrape run one after another, so a scrape can take up to
/// `(2 * interfaces + 2) * timeout` when every source is stuck.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1000);

// States of one bounded read
const READ_PENDING: u8 = 0;
const READ_DONE: u8 = 1;
const READ_ABANDONED: u8 = 2;

/// Reader backed by one virtual-filesystem path.
///
/// Any failure (missing file, permission denied, unparsable or negative
/// content, read timeout) is reported as `0.0`. A scrape must never fail
/// because one counter is momentarily unreadable.
///
/// A read that times out is abandoned, not cancelled. While any abandoned
/// read of this reader (or a clone) is still blocked, later calls report
/// `0.0` immediately instead of starting another helper thread, so a source
/// stuck for good holds at most the threads that were reading it when it
/// stalled.
#[derive(Debug, Clone)]
pub struct NumericFileReader {
    path: PathBuf,
    label_values: Vec<String>,
    divisor: Option<f64>,
    timeout: Duration,
    abandoned: Arc<AtomicUsize>,
}

impl NumericFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label_values: Vec::new(),
            divisor: None,
            timeout: DEFAULT_READ_TIMEOUT,
            abandoned: Arc::new(AtomicUsize::new(0)),
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

    /// Divide every parsed value by `divisor`. Non-positive divisors are ignored.
    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = (divisor > 0.0).then_some(divisor);
        self
    }

    /// Bound each read by `timeout`. `Duration::ZERO` reads on the calling thread.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn divisor(&self) -> Option<f64> {
        self.divisor
    }

    /// Whether a timed-out read is still blocked on the source.
    pub fn is_stalled(&self) -> bool {
        self.abandoned.load(Ordering::Acquire) > 0
    }

    fn read_contents(&self) -> Option<String> {
        if self.timeout.is_zero() {
            return match fs::read_to_string(&self.path) {
                Ok(content) => Some(content),
                Err(e) => {
                    debug!("Failed to read {}: {}", self.path.display(), e);
                    None
                }
            };
        }

        if self.is_stalled() {
            debug!(
                "Skipping {}: a previous read is still blocked",
                self.path.display()
            );
            return None;
        }

        let (tx, rx) = bounded(1);
        let path = self.path.clone();
        let state = Arc::new(AtomicU8::new(READ_PENDING));
        let spawned = thread::Builder::new()
            .name("sysfs-read".to_string())
            .spawn({
                let state = Arc::clone(&state);
                let abandoned = Arc::clone(&self.abandoned);
                move || {
                    let result = fs::read_to_string(&path);
                    if state.swap(READ_DONE, Ordering::AcqRel) == READ_ABANDONED {
                        abandoned.fetch_sub(1, Ordering::AcqRel);
                    }
                    let _ = tx.send(result);
                }
            });
        if let Err(e) = spawned {
            debug!("Failed to spawn reader for {}: {}", self.path.display(), e);
            return None;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(content)) => Some(content),
            Ok(Err(e)) => {
                debug!("Failed to read {}: {}", self.path.display(), e);
                None
            }
            Err(RecvTimeoutError::Timeout) => {
                // Count before publishing, so the helper never decrements first
                self.abandoned.fetch_add(1, Ordering::AcqRel);
                if state
                    .compare_exchange(
                        READ_PENDING,
                        READ_ABANDONED,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    )
                    .is_err()
                {
                    self.abandoned.fetch_sub(1, Ordering::AcqRel);
                }
                debug!(
                    "Read of {} timed out after {:?}",
                    self.path.display(),
                    self.timeout
                );
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl ValueReader for NumericFileReader {
    fn read_number(&self) -> f64 {
        let value = self
            .read_contents()
            .and_then(|content| parse_value(&content))
            .unwrap_or(0.0);

        match self.divisor {
            Some(divisor) => value / divisor,
            None => value,
        }
    }

    fn read_label_values(&self) -> &[String] {
        &self.label_values
    }
}

/// Parse trimmed file content. Only finite, non-negative numbers are accepted.
fn parse_value(content: &str) -> Option<f64> {
    let value: f64 = content.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_trims_whitespace() {
        assert_eq!(parse_value("  42\n"), Some(42.0));
        assert_eq!(parse_value("1.5e3"), Some(1500.0));
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("12 34"), None);
    }

    #[test]
    fn test_parse_value_rejects_negative_and_non_finite() {
        assert_eq!(parse_value("-5"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn test_path_is_kept() {
        let reader = NumericFileReader::new("/sys/class/net/eth0/statistics/tx_bytes");
        assert_eq!(
            reader.path(),
            Path::new("/sys/class/net/eth0/statistics/tx_bytes")
        );
        assert!(!reader.is_stalled());
    }

    #[test]
    fn test_non_positive_divisor_is_ignored() {
        assert_eq!(NumericFileReader::new("/x").with_divisor(0.0).divisor(), None);
        assert_eq!(NumericFileReader::new("/x").with_divisor(-1.0).divisor(), None);
        assert_eq!(
            NumericFileReader::new("/x").with_divisor(1e9).divisor(),
            Some(1e9)
        );
    }
}
