//! 集成测试公共模块

use sqlquery_logger::{LoggerConfig, LoggerOptions, QueryLogger};
use std::sync::{Arc, Mutex};

/// 记录 sink 收到的每一行
#[derive(Clone, Default)]
pub struct CapturedLines(Arc<Mutex<Vec<String>>>);

impl CapturedLines {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().expect("capture lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().expect("capture lock poisoned").len()
    }

    /// 是否存在包含全部片段的行
    pub fn any_line_contains(&self, needles: &[&str]) -> bool {
        self.lines()
            .iter()
            .any(|line| needles.iter().all(|needle| line.contains(needle)))
    }
}

/// 创建带捕获 sink 的日志器（默认配置，带颜色）
pub fn capturing_logger() -> (QueryLogger, CapturedLines) {
    capturing_logger_with(LoggerConfig::default())
}

/// 使用指定配置创建带捕获 sink 的日志器
pub fn capturing_logger_with(config: LoggerConfig) -> (QueryLogger, CapturedLines) {
    let captured = CapturedLines::default();
    let inner = Arc::clone(&captured.0);
    let logger = QueryLogger::with_options(
        LoggerOptions::new().config(config).log(move |line| {
            inner.lock().expect("capture lock poisoned").push(line.to_string());
        }),
    );
    (logger, captured)
}

/// 关闭颜色的配置，便于精确比较
#[allow(dead_code)]
pub fn plain_config() -> LoggerConfig {
    LoggerConfig { colors: false, ..LoggerConfig::default() }
}
