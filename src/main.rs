//! 命令行入口：从标准输入逐行读取语句并输出查询帧
//!
//! 每行格式为 `<SQL>` 或 `<SQL>\t<JSON 参数数组>`。
//!
//! 参数：`--no-color`、`--config=<path>`、`--log-level=<level>`

use anyhow::Result;
use sqlquery_logger::logging::init_from_settings;
use sqlquery_logger::{LoggerConfig, LoggerOptions, Param, QueryLogger, QueryLoggerError};
use std::io::{self, BufRead};

struct CliArgs {
    no_color: bool,
    config: Option<String>,
    log_level: Option<String>,
}

impl CliArgs {
    fn from_args<I: Iterator<Item = String>>(args: I) -> Self {
        let mut cli = Self { no_color: false, config: None, log_level: None };
        for arg in args {
            if arg == "--no-color" {
                cli.no_color = true;
            } else if let Some(path) = arg.strip_prefix("--config=") {
                cli.config = Some(path.to_string());
            } else if let Some(level) = arg.strip_prefix("--log-level=") {
                cli.log_level = Some(level.to_lowercase());
            }
        }
        cli
    }
}

/// 拆分一行输入为语句与参数
fn parse_line(line: &str) -> Result<(&str, Vec<Param>), QueryLoggerError> {
    match line.split_once('\t') {
        Some((sql, raw)) if !raw.trim().is_empty() => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            let params = match value {
                serde_json::Value::Array(items) => {
                    items.into_iter().map(Param::from).collect()
                }
                other => vec![Param::from(other)],
            };
            Ok((sql, params))
        }
        Some((sql, _)) => Ok((sql, Vec::new())),
        None => Ok((line, Vec::new())),
    }
}

/// 加载配置文件并应用命令行覆盖，最后统一校验一次
fn build_config(cli: &CliArgs) -> Result<LoggerConfig, QueryLoggerError> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::parse_file(path)?,
        None => LoggerConfig::default(),
    };
    if cli.no_color {
        config.colors = false;
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = CliArgs::from_args(std::env::args().skip(1));
    let config = build_config(&cli)?;
    init_from_settings(&config.log)?;

    let logger = QueryLogger::with_options(LoggerOptions::new().config(config));

    let stdin = io::stdin();
    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok((sql, params)) => logger.log_query(sql, &params),
            Err(e) => {
                tracing::warn!(line = line_num + 1, error = %e, "参数列不是合法 JSON，按无参数记录");
                let sql = line.split_once('\t').map_or(line.as_str(), |(sql, _)| sql);
                logger.log_query(sql, &[]);
            }
        }
    }

    tracing::info!(count = logger.query_count(), "处理完成");
    Ok(())
}
