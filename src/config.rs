//! 配置管理模块
//!
//! 提供 TOML 配置文件的读取、保存与校验。所有字段都有默认值，
//! 配置文件只需写出需要覆盖的部分。

use crate::colors::Palette;
use crate::error::{QueryLoggerError, Result};
use crate::session::{DEFAULT_CAPACITY, DEFAULT_TTL_MS};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 页脚分隔线的最大宽度
pub(crate) const MAX_FOOTER_WIDTH: usize = 500;

/// 主配置结构体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// 是否输出 ANSI 颜色
    pub colors: bool,
    /// 页脚分隔线宽度
    pub footer_width: usize,
    /// 查询元数据存活时间（毫秒）
    pub session_ttl_ms: u64,
    /// 查询元数据最大条数
    pub session_capacity: usize,
    /// 时间行格式（chrono strftime）
    pub timestamp_format: String,
    /// 诊断日志配置
    pub log: LogSettings,
}

/// 诊断日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 日志文件目录，空表示只输出到控制台
    pub log_dir: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            colors: true,
            footer_width: 50,
            session_ttl_ms: DEFAULT_TTL_MS,
            session_capacity: DEFAULT_CAPACITY,
            timestamp_format: "%H:%M:%S".to_string(),
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), log_dir: None }
    }
}

impl LoggerConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件解析配置，不做校验
    ///
    /// 调用方需要在覆盖字段后自行调用 [`LoggerConfig::validate`]。
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// 从字符串加载配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        match self.log.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(QueryLoggerError::config_error(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        if self.footer_width == 0 || self.footer_width > MAX_FOOTER_WIDTH {
            return Err(QueryLoggerError::config_error(format!(
                "页脚宽度必须在 1..={MAX_FOOTER_WIDTH} 之间: {}",
                self.footer_width
            )));
        }

        if self.session_capacity == 0 {
            return Err(QueryLoggerError::config_error("会话容量不能为0"));
        }

        if self.session_ttl_ms == 0 {
            return Err(QueryLoggerError::config_error("会话存活时间不能为0"));
        }

        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format)
                .any(|item| matches!(item, Item::Error))
        {
            return Err(QueryLoggerError::config_error(format!(
                "无效的时间格式: {:?}",
                self.timestamp_format
            )));
        }

        Ok(())
    }

    /// 根据 `colors` 选择调色板
    pub fn palette(&self) -> Palette {
        if self.colors { Palette::ansi() } else { Palette::plain() }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_millis(self.session_ttl_ms)
    }
}
