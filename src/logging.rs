//! 诊断日志初始化模块
//!
//! 查询帧本身通过注入的 sink 输出；这里初始化的是库自身的 tracing 诊断
//! 日志（分类、表名提取、会话淘汰、参数序列化降级等）。
//! 默认只输出到控制台，配置了目录时额外写入按天滚动的日志文件。

use crate::config::LogSettings;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: Level,
    /// 日志文件目录，`None` 表示只输出到控制台
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// 创建新的日志配置，使用默认级别
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// 设置日志文件目录
    pub fn log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// 从字符串解析级别，无法识别时回退到 INFO
    pub fn parse_level(level: &str) -> Level {
        match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::INFO, log_dir: None }
    }
}

/// 日志初始化错误
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
}

/// 日志初始化结果
pub type LogResult<T> = Result<T, LogError>;

/// 初始化日志系统
///
/// - 控制台输出层始终启用，带 ANSI 颜色
/// - `log_dir` 存在时追加按天滚动的文件层（不带颜色）
/// - `RUST_LOG` 环境变量优先于配置的级别
///
/// # Examples
///
/// ```no_run
/// use sqlquery_logger::logging::{init_logging, LogConfig};
/// use tracing::Level;
///
/// let config = LogConfig::new().level(Level::DEBUG);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> LogResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(SystemTime)
        .with_target(true)
        .with_ansi(true);

    let result = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender =
                tracing_appender::rolling::daily(dir, "sqlquery-logger");
            let (non_blocking, guard) =
                tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_timer(SystemTime)
                .with_target(true)
                .with_ansi(false);

            let result = Registry::default()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init();
            if result.is_ok() {
                // 保持 guard 防止退出时丢失日志
                std::mem::forget(guard);
            }
            result
        }
        None => {
            Registry::default().with(env_filter).with(console_layer).try_init()
        }
    };

    // 已经初始化过不是错误
    if result.is_ok() {
        tracing::debug!(level = %config.level, "诊断日志初始化完成");
    }
    Ok(())
}

/// 按配置文件中的 `[log]` 段初始化日志系统
///
/// 失败时以 [`QueryLoggerError::Log`](crate::error::QueryLoggerError::Log) 返回。
pub fn init_from_settings(settings: &LogSettings) -> crate::error::Result<()> {
    let mut config = LogConfig::new().level(LogConfig::parse_level(&settings.level));
    if let Some(dir) = &settings.log_dir {
        config = config.log_dir(dir);
    }
    init_logging(config)?;
    Ok(())
}

/// 使用默认配置初始化日志系统
///
/// ```no_run
/// use sqlquery_logger::logging::init_default_logging;
///
/// init_default_logging().unwrap();
/// ```
pub fn init_default_logging() -> LogResult<()> {
    init_logging(LogConfig::default())
}
