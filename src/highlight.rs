//! SQL 文本高亮
//!
//! 三遍顺序的正则改写，不是分词器：
//!
//! ```text
//! 原始语句 → 关键字（大写 + 蓝色） → 字符串字面量（绿色） → 数字（青色）
//! ```
//!
//! 顺序不可调换：后一遍会覆盖前一遍已包裹区域内的匹配。
//! 转义串中的数字后面紧跟 `m`，因此不会被数字这一遍当作独立数字。
//!
//! # Example
//!
//! ```rust
//! use sqlquery_logger::colors::Palette;
//! use sqlquery_logger::highlight::SqlHighlighter;
//!
//! let highlighter = SqlHighlighter::new(Palette::plain());
//! assert_eq!(highlighter.highlight("select 1 from t"), "SELECT 1 FROM t");
//! ```

use crate::colors::{Color, Palette};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// 需要高亮的关键字（大小写不敏感，整词匹配）
pub const KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "INSERT",
    "INTO",
    "UPDATE",
    "SET",
    "DELETE",
    "CREATE",
    "DROP",
    "ALTER",
    "TABLE",
    "INDEX",
    "PRIMARY",
    "KEY",
    "FOREIGN",
    "REFERENCES",
    "NOT",
    "NULL",
    "DEFAULT",
    "UNIQUE",
    "AUTO_INCREMENT",
    "IF",
    "EXISTS",
    "ON",
    "DUPLICATE",
    "VALUES",
    "ORDER",
    "BY",
    "GROUP",
    "HAVING",
    "LIMIT",
    "OFFSET",
    "INNER",
    "LEFT",
    "RIGHT",
    "OUTER",
    "UNION",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "AS",
    "DISTINCT",
    "COUNT",
    "SUM",
    "AVG",
    "MAX",
    "MIN",
    "AND",
    "OR",
    "IN",
    "LIKE",
    "BETWEEN",
    "IS",
];

lazy_static! {
    static ref KEYWORD_RE: Regex =
        Regex::new(&format!(r"(?i)\b(?:{})\b", KEYWORDS.join("|")))
            .expect("keyword pattern is valid");
    static ref STRING_RE: Regex =
        Regex::new(r#"'[^']*'|"[^"]*""#).expect("string pattern is valid");
    static ref NUMBER_RE: Regex =
        Regex::new(r"\b\d+\b").expect("number pattern is valid");
}

/// SQL 高亮器
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlHighlighter {
    palette: Palette,
}

impl SqlHighlighter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// 返回高亮后的语句；对任意输入都不会失败
    pub fn highlight(&self, sql: &str) -> String {
        let palette = self.palette;

        let keywords = KEYWORD_RE.replace_all(sql, |caps: &Captures| {
            palette.paint(Color::Blue, &caps[0].to_uppercase())
        });
        let strings = STRING_RE.replace_all(&keywords, |caps: &Captures| {
            palette.paint(Color::Green, &caps[0])
        });
        let numbers = NUMBER_RE.replace_all(&strings, |caps: &Captures| {
            palette.paint(Color::Cyan, &caps[0])
        });

        numbers.into_owned()
    }
}

/// 使用 ANSI 调色板高亮语句
pub fn highlight(sql: &str) -> String {
    SqlHighlighter::new(Palette::ansi()).highlight(sql)
}
