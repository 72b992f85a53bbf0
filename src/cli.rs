//! Command-line interface definitions using clap

use clap::Parser;

use crate::config::StaticConfig;
use crate::errors::Result;

/// container-exporter - Prometheus exporter for container resource counters
#[derive(Parser, Debug, Default)]
#[command(name = "container-exporter")]
#[command(version)]
#[command(about = "Exports cgroup memory/CPU and per-interface network counters", long_about = None)]
pub struct Cli {
    /// IP address and port number to serve
    #[arg(long, short = 'b')]
    pub bind_address: Option<String>,

    /// Configuration file (default: config.toml when present)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Log filter, e.g. "info" or "container_exporter=debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Cli {
    /// Load the configuration and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<StaticConfig> {
        let mut config = StaticConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut StaticConfig) {
        if let Some(bind_address) = &self.bind_address {
            config.server.bind_address = bind_address.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
