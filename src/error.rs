//! 错误类型定义
//!
//! 只有配置加载和命令行入口会产生错误。`log_query` 及全部格式化函数
//! 对任意输入都是全函数，不会返回错误。

/// 库内统一的结果类型
pub type Result<T> = std::result::Result<T, QueryLoggerError>;

/// 查询日志库错误类型
#[derive(Debug, thiserror::Error)]
pub enum QueryLoggerError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析错误
    #[error("配置解析错误: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("配置序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON 错误（命令行参数列）
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 日志错误（仅在启用 logging feature 时可用）
    #[cfg(feature = "logging")]
    #[error("日志错误: {0}")]
    Log(#[from] crate::logging::LogError),

    /// 其他错误
    #[error("未知错误: {0}")]
    Other(String),
}

impl QueryLoggerError {
    /// 创建一个配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("配置错误: {}", message);
        Self::Config(message)
    }

    /// 创建一个其他类型错误
    pub fn other<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        tracing::error!("未知错误: {}", message);
        Self::Other(message)
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, QueryLoggerError::Io(_))
    }

    /// 检查是否为配置错误（包括 TOML 解析失败）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QueryLoggerError::Config(_) | QueryLoggerError::TomlDe(_)
        )
    }

    /// 检查是否为日志初始化错误
    #[cfg(feature = "logging")]
    pub fn is_log_error(&self) -> bool {
        matches!(self, QueryLoggerError::Log(_))
    }

    /// 检查是否为其他错误
    pub fn is_other_error(&self) -> bool {
        matches!(self, QueryLoggerError::Other(_))
    }
}
