//! SQL 语句识别模块
//!
//! 提供语句类型分类、展示映射（图标与颜色）以及主表名提取

pub mod kind;
pub mod table;

// 重新导出核心类型和函数
pub use kind::{StatementKind, classify};
pub use table::extract_table;
