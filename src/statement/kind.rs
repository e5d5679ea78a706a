//! 语句类型分类与展示映射

use crate::colors::Color;
use std::fmt;

/// 语句类型，由去除首尾空白后的前导关键字决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Other,
}

/// 前导关键字匹配顺序，先匹配者优先
const LEADING_KEYWORDS: [(&str, StatementKind); 7] = [
    ("SELECT", StatementKind::Select),
    ("INSERT", StatementKind::Insert),
    ("UPDATE", StatementKind::Update),
    ("DELETE", StatementKind::Delete),
    ("CREATE", StatementKind::Create),
    ("DROP", StatementKind::Drop),
    ("ALTER", StatementKind::Alter),
];

impl StatementKind {
    /// 对语句进行分类，空串或纯空白返回 `Other`
    pub fn classify(statement: &str) -> Self {
        let upper = statement.trim().to_uppercase();
        let kind = LEADING_KEYWORDS
            .iter()
            .find(|(keyword, _)| upper.starts_with(keyword))
            .map_or(StatementKind::Other, |&(_, kind)| kind);

        #[cfg(feature = "logging")]
        tracing::trace!(kind = kind.as_str(), len = statement.len(), "语句分类完成");

        kind
    }

    /// 大写名称
    pub const fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Create => "CREATE",
            StatementKind::Drop => "DROP",
            StatementKind::Alter => "ALTER",
            StatementKind::Other => "OTHER",
        }
    }

    /// 展示图标
    pub const fn icon(self) -> &'static str {
        match self {
            StatementKind::Select => "🔍",
            StatementKind::Insert => "📝",
            StatementKind::Update => "✏️",
            StatementKind::Delete => "🗑️",
            StatementKind::Create => "🏗️",
            StatementKind::Drop => "💥",
            StatementKind::Alter => "🔧",
            StatementKind::Other => "⚡",
        }
    }

    /// 展示颜色
    pub const fn color(self) -> Color {
        match self {
            StatementKind::Select => Color::Green,
            StatementKind::Insert => Color::Blue,
            StatementKind::Update => Color::Yellow,
            StatementKind::Delete | StatementKind::Drop => Color::Red,
            StatementKind::Create => Color::Magenta,
            StatementKind::Alter => Color::Cyan,
            StatementKind::Other => Color::White,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 对语句进行分类，等价于 [`StatementKind::classify`]
pub fn classify(statement: &str) -> StatementKind {
    StatementKind::classify(statement)
}
