//! 查询日志输出
//!
//! `QueryLogger` 把分类、表名提取、高亮、参数渲染组合成固定的多行帧，
//! 每一行单独调用一次注入的 sink：
//!
//! ```text
//! ╭─ Database Query #1
//! │  Time: 10:42:07
//! │  🔍 SELECT on users
//! │  SQL: SELECT * FROM users WHERE id = ?
//!    ├─ Parameters: $1: 1          (只有参数非空时输出)
//! ╰───────────────────────────────
//! ```
//!
//! 没有参数时输出 5 行，有参数时输出 6 行。`log_query` 不返回错误也不会 panic。

use crate::colors::{Color, Palette};
use crate::config::{LoggerConfig, MAX_FOOTER_WIDTH};
use crate::highlight::SqlHighlighter;
use crate::params::{Param, render_params};
use crate::session::SessionTracker;
use crate::statement::{StatementKind, extract_table};
use chrono::Local;
use std::fmt::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 时间格式无法渲染时使用的格式
const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M:%S";
/// 会话元数据的最短存活时间
const MIN_SESSION_TTL: Duration = Duration::from_millis(1);

/// 宿主数据库层调用的日志接口
pub trait Logger {
    /// 接收一条语句及其绑定参数
    fn log_query(&self, query: &str, params: &[Param]);
}

/// 输出 sink：每次调用接收一行文本
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// 默认 sink，写到标准输出
pub fn stdout_sink() -> Sink {
    Arc::new(|line: &str| println!("{line}"))
}

/// 把每一行作为 tracing 事件输出
#[cfg(feature = "logging")]
pub fn tracing_sink() -> Sink {
    Arc::new(|line: &str| {
        tracing::info!(target: "sqlquery_logger::frame", "{}", line);
    })
}

/// 构造选项
#[derive(Clone)]
pub struct LoggerOptions {
    pub log: Sink,
    pub config: LoggerConfig,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置输出 sink
    pub fn log<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Arc::new(sink);
        self
    }

    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self { log: stdout_sink(), config: LoggerConfig::default() }
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("log", &"<sink>")
            .field("config", &self.config)
            .finish()
    }
}

/// 带颜色的查询日志器
pub struct QueryLogger {
    sink: Sink,
    config: LoggerConfig,
    palette: Palette,
    highlighter: SqlHighlighter,
    sessions: SessionTracker,
    // 一帧的全部行连续写入 sink
    frame_lock: Mutex<()>,
}

impl QueryLogger {
    /// 使用默认选项（标准输出、默认配置）
    pub fn new() -> Self {
        Self::with_options(LoggerOptions::default())
    }

    /// 使用自定义 sink，其余保持默认
    pub fn with_sink<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::with_options(LoggerOptions::default().log(sink))
    }

    pub fn with_options(options: LoggerOptions) -> Self {
        let LoggerOptions { log, config } = options;
        let palette = config.palette();
        // 配置字段是公开的，未经校验的值在这里收敛到可用范围
        let sessions = SessionTracker::with_limits(
            config.session_ttl().max(MIN_SESSION_TTL),
            config.session_capacity,
        );
        Self {
            sink: log,
            palette,
            highlighter: SqlHighlighter::new(palette),
            sessions,
            config,
            frame_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// 已记录的查询条数
    pub fn query_count(&self) -> u64 {
        self.sessions.count()
    }

    pub fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }

    /// 记录一条语句
    pub fn log_query(&self, query: &str, params: &[Param]) {
        let _frame = self
            .frame_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for line in self.render(query, params) {
            (self.sink)(&line);
        }
    }

    /// 生成一帧的全部行，并登记会话
    pub fn render(&self, query: &str, params: &[Param]) -> Vec<String> {
        let kind = StatementKind::classify(query);
        let table = extract_table(query);
        let ticket = self.sessions.begin(kind, table.clone());

        #[cfg(feature = "logging")]
        tracing::debug!(
            id = %ticket.id,
            kind = kind.as_str(),
            table = ?table,
            params = params.len(),
            "记录查询"
        );

        let p = &self.palette;
        let gray = p.code(Color::Gray);
        let mut lines = Vec::with_capacity(6);

        lines.push(format!(
            "\n{}{}╭─ Database Query {}#{}{}",
            p.bright(),
            p.code(Color::Cyan),
            p.dim(),
            ticket.seq,
            p.reset()
        ));

        lines.push(format!(
            "{gray}│  {}Time: {}{}",
            p.dim(),
            self.timestamp(),
            p.reset()
        ));

        let mut info = format!(
            "{gray}│  {} {}{}{}{}",
            kind.icon(),
            p.code(kind.color()),
            p.bright(),
            kind.as_str(),
            p.reset()
        );
        if let Some(table) = &table {
            info.push_str(&format!(
                " {}on{} {}",
                p.dim(),
                p.reset(),
                p.paint(Color::Yellow, table)
            ));
        }
        lines.push(info);

        lines.push(format!(
            "{gray}│  {}SQL:{} {}",
            p.dim(),
            p.reset(),
            self.highlighter.highlight(query)
        ));

        if !params.is_empty() {
            lines.push(format!(
                "{gray}   ├─ Parameters: {}{}",
                p.reset(),
                render_params(p, params)
            ));
        }

        lines.push(format!(
            "{gray}╰─{}{}{}",
            p.dim(),
            "─".repeat(self.config.footer_width.clamp(1, MAX_FOOTER_WIDTH)),
            p.reset()
        ));

        lines
    }

    fn timestamp(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.config.timestamp_format)).is_err() {
            out.clear();
            // 固定格式总能渲染
            let _ = write!(out, "{}", now.format(FALLBACK_TIMESTAMP_FORMAT));
        }
        out
    }
}

impl Default for QueryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for QueryLogger {
    fn log_query(&self, query: &str, params: &[Param]) {
        QueryLogger::log_query(self, query, params);
    }
}

impl fmt::Debug for QueryLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryLogger")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
