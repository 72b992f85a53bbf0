pub mod metrics;

pub use metrics::{MetricsService, metrics_routes};
