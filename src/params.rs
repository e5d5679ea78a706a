//! 绑定参数与参数渲染
//!
//! 参数值域是开放的：空值、字符串、数字、布尔以及任意可序列化的结构化值。
//! 结构化值的序列化可能失败，此时降级为 `Debug` 文本并以告警色渲染，
//! 整个渲染过程不会失败。

use crate::colors::{Color, Palette};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 可序列化的结构化值
trait StructuredValue: fmt::Debug + Send + Sync {
    fn to_json(&self) -> serde_json::Result<String>;
}

impl<T> StructuredValue for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 结构化序列化的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializeOutcome {
    /// 紧凑 JSON 文本
    Structural(String),
    /// 序列化失败时的默认字符串转换
    Fallback(String),
}

/// 结构化参数（对象、数组等）
#[derive(Clone)]
pub struct StructuredParam(Arc<dyn StructuredValue>);

impl StructuredParam {
    pub fn new<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }

    /// 尝试序列化为 JSON，失败时返回降级文本
    pub fn serialize(&self) -> SerializeOutcome {
        match self.0.to_json() {
            Ok(json) => SerializeOutcome::Structural(json),
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::warn!(error = %e, "参数无法序列化，降级为默认字符串");
                #[cfg(not(feature = "logging"))]
                let _ = e;
                SerializeOutcome::Fallback(format!("{:?}", self.0))
            }
        }
    }
}

impl fmt::Debug for StructuredParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructuredParam").field(&self.0).finish()
    }
}

/// 单个绑定参数
#[derive(Debug, Clone)]
pub enum Param {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Structured(StructuredParam),
}

impl Param {
    /// 包装任意可序列化值
    pub fn structured<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Param::Structured(StructuredParam::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(value: $t) -> Self {
                    Param::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Param::Float(value as f64), Param::Int)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Float(f64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl From<serde_json::Value> for Param {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Param::Null,
            Value::Bool(b) => Param::Bool(b),
            Value::String(s) => Param::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Param::Int(i),
                None => match n.as_f64() {
                    Some(f) => Param::Float(f),
                    None => Param::structured(Value::Number(n)),
                },
            },
            other @ (Value::Array(_) | Value::Object(_)) => {
                Param::structured(other)
            }
        }
    }
}

/// 构造参数列表
///
/// ```rust
/// use sqlquery_logger::params;
///
/// let params = params!["John", 42, true, None::<i32>];
/// assert_eq!(params.len(), 4);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::params::Param>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::params::Param::from($value)),+]
    };
}

/// 浮点数文本
///
/// 指数区间与特殊值的写法同 ECMAScript 的 `Number::toString`：
/// `NaN`、`Infinity`、`-0` 写作 `0`，绝对值不小于 1e21 或小于 1e-6 时
/// 使用带符号指数（`1e+21`、`1.5e-7`）。
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => {
                format!("{mantissa}e+{exp}")
            }
            _ => text,
        };
    }
    value.to_string()
}

/// 渲染单个参数值（不含序号前缀）
pub fn render_param(palette: &Palette, param: &Param) -> String {
    match param {
        Param::Null => format!("{}null{}", palette.dim(), palette.reset()),
        Param::Text(s) => palette.paint(Color::Green, &format!("\"{s}\"")),
        Param::Int(i) => palette.paint(Color::Cyan, &i.to_string()),
        Param::Float(f) => palette.paint(Color::Cyan, &format_float(*f)),
        Param::Bool(b) => palette.paint(Color::Yellow, &b.to_string()),
        Param::Structured(value) => match value.serialize() {
            SerializeOutcome::Structural(json) => {
                palette.paint(Color::Magenta, &json)
            }
            SerializeOutcome::Fallback(text) => palette.paint(Color::Red, &text),
        },
    }
}

/// 渲染参数列表：`$1: v1, $2: v2, ...`；空列表返回空串
pub fn render_params(palette: &Palette, params: &[Param]) -> String {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            format!(
                "{}${}:{} {}",
                palette.dim(),
                index + 1,
                palette.reset(),
                render_param(palette, param)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
