//! SQL 查询调试日志
//!
//! 拦截宿主数据库层执行的语句与绑定参数，输出带颜色的多行跟踪帧。
//!
//! ```rust
//! use sqlquery_logger::{QueryLogger, params};
//!
//! let logger = QueryLogger::with_sink(|line| eprintln!("{line}"));
//! logger.log_query("SELECT * FROM users WHERE id = ?", &params![1]);
//! ```

// 核心模块 - 始终可用
pub mod colors;
pub mod config;
pub mod error;
pub mod highlight;
pub mod logger;
pub mod params;
pub mod session;
pub mod statement;

// 诊断日志模块 - 需要 logging 功能
#[cfg(feature = "logging")]
pub mod logging;

pub use colors::{Color, Palette};
pub use config::LoggerConfig;
pub use error::{QueryLoggerError, Result};
pub use highlight::{SqlHighlighter, highlight};
pub use logger::{Logger, LoggerOptions, QueryLogger, Sink, stdout_sink};
pub use params::{Param, SerializeOutcome, render_params};
pub use session::SessionTracker;
pub use statement::{StatementKind, classify, extract_table};
