use std::fmt;

#[derive(Debug, Clone)]
pub enum ExporterError {
    Config(String),
    Descriptor(String),
    Registry(String),
    Bind(String),
    Encode(String),
    FileOperation(String),
}

impl ExporterError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ExporterError::Config(_) => "E001",
            ExporterError::Descriptor(_) => "E002",
            ExporterError::Registry(_) => "E003",
            ExporterError::Bind(_) => "E004",
            ExporterError::Encode(_) => "E005",
            ExporterError::FileOperation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ExporterError::Config(_) => "Configuration Error",
            ExporterError::Descriptor(_) => "Metric Descriptor Error",
            ExporterError::Registry(_) => "Metric Registry Error",
            ExporterError::Bind(_) => "Listener Bind Error",
            ExporterError::Encode(_) => "Metric Encoding Error",
            ExporterError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ExporterError::Config(msg) => msg,
            ExporterError::Descriptor(msg) => msg,
            ExporterError::Registry(msg) => msg,
            ExporterError::Bind(msg) => msg,
            ExporterError::Encode(msg) => msg,
            ExporterError::FileOperation(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ExporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ExporterError {}

// 便捷的构造函数
impl ExporterError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        ExporterError::Config(msg.into())
    }

    pub fn descriptor<T: Into<String>>(msg: T) -> Self {
        ExporterError::Descriptor(msg.into())
    }

    pub fn registry<T: Into<String>>(msg: T) -> Self {
        ExporterError::Registry(msg.into())
    }

    pub fn bind<T: Into<String>>(msg: T) -> Self {
        ExporterError::Bind(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        ExporterError::Encode(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ExporterError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::FileOperation(err.to_string())
    }
}

impl From<prometheus::Error> for ExporterError {
    fn from(err: prometheus::Error) -> Self {
        ExporterError::Registry(err.to_string())
    }
}

impl From<config::ConfigError> for ExporterError {
    fn from(err: config::ConfigError) -> Self {
        ExporterError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
