//! container-exporter - a Prometheus exporter for container resource counters
//!
//! Reads memory usage and CPU time from the local cgroup (v1) and per-interface
//! transmit/receive byte counters from sysfs on every scrape.
//!
//! # Architecture
//! - `metrics`: metric descriptors, value readers and the aggregating collector
//! - `api`: HTTP scrape endpoint
//! - `config`: configuration loading
//! - `runtime`: startup wiring and the HTTP server
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod runtime;
pub mod system;
