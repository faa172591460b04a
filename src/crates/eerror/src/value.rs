//! Attribute values

use crate::constants::{BOOL_TAG, FLOAT64_TAG, INT_TAG, NULL_LITERAL, NULL_TAG, UINT_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed attribute value
///
/// Strings render verbatim (escaped as needed); every other variant renders
/// with a `(tag)` prefix so the parser can restore its type.
///
/// In serde form values are plain JSON scalars, except `Uint`, which is
/// written as `{"uint": n}` so it does not come back as `Int`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Type tag used in the canonical text form, `None` for strings
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            AttributeValue::Null => Some(NULL_TAG),
            AttributeValue::Bool(_) => Some(BOOL_TAG),
            AttributeValue::Int(_) => Some(INT_TAG),
            AttributeValue::Uint(_) => Some(UINT_TAG),
            AttributeValue::Float(_) => Some(FLOAT64_TAG),
            AttributeValue::String(_) => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, AttributeValue::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            AttributeValue::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Key form of a value, used when a non-string appears in key position
    pub(crate) fn into_key(self) -> String {
        match self {
            AttributeValue::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AttributeValue {
    /// Writes the literal text, without any type tag
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str(NULL_LITERAL),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(n) => write!(f, "{}", n),
            AttributeValue::Uint(n) => write!(f, "{}", n),
            AttributeValue::Float(n) => write!(f, "{}", n),
            AttributeValue::String(s) => f.write_str(s),
        }
    }
}

/// Serde representation of [`AttributeValue`]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Bare integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    String(String),
    Tagged { uint: u64 },
}

impl From<AttributeValue> for WireValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Null => WireValue::Null,
            AttributeValue::Bool(b) => WireValue::Bool(b),
            AttributeValue::Int(n) => WireValue::Int(n),
            AttributeValue::Uint(n) => WireValue::Tagged { uint: n },
            AttributeValue::Float(n) => WireValue::Float(n),
            AttributeValue::String(s) => WireValue::String(s),
        }
    }
}

impl From<WireValue> for AttributeValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null => AttributeValue::Null,
            WireValue::Bool(b) => AttributeValue::Bool(b),
            WireValue::Int(n) => AttributeValue::Int(n),
            WireValue::Unsigned(n) | WireValue::Tagged { uint: n } => AttributeValue::Uint(n),
            WireValue::Float(n) => AttributeValue::Float(n),
            WireValue::String(s) => AttributeValue::String(s),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for AttributeValue {
                fn from(value: $source) -> Self {
                    AttributeValue::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(f64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}
