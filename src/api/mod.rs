//! HTTP surface of the exporter

pub mod services;
