use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ExporterError, Result};

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、worker 数量
/// - collector: 单次文件读取超时
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：CE，分隔符：__
    /// 示例：CE__SERVER__BIND_ADDRESS=127.0.0.1:9100
    ///
    /// An explicit `path` must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (file, required) = match path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(file).required(required))
            .add_source(
                Environment::with_prefix("CE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ExporterError::config("server.bind_address must not be empty"));
        }
        if self.server.workers == 0 {
            return Err(ExporterError::config("server.workers must be at least 1"));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ExporterError::config(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// HTTP 监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl ServerConfig {
    /// Address to hand to the listener.
    ///
    /// A bare `:port` binds on every IPv4 interface.
    pub fn socket_address(&self) -> String {
        let address = self.bind_address.trim();
        match address.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None => address.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            workers: default_workers(),
        }
    }
}

/// 采集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Upper bound for one source read, 0 disables the bound.
    ///
    /// Sources are read one after another, so a scrape where every source
    /// is stuck takes `(2 * interfaces + 2) * read_timeout_ms`. Keep that
    /// below the Prometheus `scrape_timeout` (10s by default).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl CollectorConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default)]
    pub enable_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: false,
        }
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_bind_address() -> String {
    ":9009".to_string()
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_read_timeout_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address_listens_everywhere() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address, ":9009");
        assert_eq!(server.socket_address(), "0.0.0.0:9009");
    }

    #[test]
    fn test_explicit_bind_address_is_kept() {
        let server = ServerConfig {
            bind_address: " 127.0.0.1:9100 ".to_string(),
            workers: 1,
        };
        assert_eq!(server.socket_address(), "127.0.0.1:9100");
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = StaticConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = StaticConfig::default();
        config.server.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("read_timeout_ms = 1000"));

        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config should parse");
        assert_eq!(parsed.server.bind_address, ":9009");
        assert_eq!(parsed.logging.level, "info");
    }
}
