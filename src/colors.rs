//! 终端颜色
//!
//! `Color` 是封闭的颜色标记集合，`Palette` 负责把标记解析为 ANSI 转义串。
//! 关闭颜色时使用 `Palette::plain()`，所有转义串均为空。

/// 颜色标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    /// ANSI SGR 转义串
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::Gray => "\x1b[90m",
        }
    }
}

const RESET: &str = "\x1b[0m";
const BRIGHT: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// 调色板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// 输出 ANSI 转义串的调色板
    pub const fn ansi() -> Self {
        Self { enabled: true }
    }

    /// 不输出任何转义串的调色板
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn code(&self, color: Color) -> &'static str {
        if self.enabled { color.ansi_code() } else { "" }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled { RESET } else { "" }
    }

    pub fn bright(&self) -> &'static str {
        if self.enabled { BRIGHT } else { "" }
    }

    pub fn dim(&self) -> &'static str {
        if self.enabled { DIM } else { "" }
    }

    /// 用指定颜色包裹文本：`{code}{text}{reset}`
    pub fn paint(&self, color: Color, text: &str) -> String {
        format!("{}{}{}", self.code(color), text, self.reset())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}
