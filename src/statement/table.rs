//! 主表名提取
//!
//! 尽力而为的文本匹配，不做 SQL 解析，也不校验表名是否存在。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 依次尝试的表名模式，标识符两侧可带一对反引号或双引号
    static ref TABLE_PATTERNS: [Regex; 2] = [
        Regex::new(r#"(?i)(?:FROM|INTO|UPDATE|JOIN)\s+["`]?([A-Za-z0-9_]+)["`]?"#)
            .expect("table pattern is valid"),
        Regex::new(r#"(?i)(?:CREATE|DROP)\s+TABLE\s+["`]?([A-Za-z0-9_]+)["`]?"#)
            .expect("table pattern is valid"),
    ];
}

/// 提取语句引用的第一个表名
///
/// 返回第一个匹配模式的第一个捕获组；多表语句（如 JOIN）只返回首个。
pub fn extract_table(statement: &str) -> Option<String> {
    let table = TABLE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(statement)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });

    #[cfg(feature = "logging")]
    tracing::trace!(table = ?table, "表名提取完成");

    table
}
