//! Declared field types and the conversion of Rust values into field values.
//!
//! Field values travel as [`serde_json::Value`]. [`FieldType`] stands in for
//! the static type a field is declared with, and [`FieldType::accepts`] is
//! the assignability check synthesis applies before storing a value.

use std::fmt;

use serde_json::Value;

mod impls;

/// Declared type of a record field.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum FieldType {
    /// Accepts any value.
    Any,
    /// Only `null`.
    Null,
    /// Booleans.
    Bool,
    /// Numbers representable as `i64` or `u64`.
    Integer,
    /// Any number.
    Float,
    /// Strings.
    String,
    /// Arrays whose elements all satisfy the item type.
    List(Box<FieldType>),
    /// Objects whose values all satisfy the value type.
    Map(Box<FieldType>),
    /// Objects of any content, such as a nested record.
    Object,
    /// `null` or the inner type.
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Runtime type of `value`.
    ///
    /// Arrays report `List(Any)` because their element type is not declared
    /// anywhere.
    #[must_use]
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::List(Box::new(Self::Any)),
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns `true` when `value` may be stored in a field of this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Null | Self::Optional(_), Value::Null)
            | (Self::Bool, Value::Bool(_))
            | (Self::Float, Value::Number(_))
            | (Self::String, Value::String(_))
            | (Self::Object, Value::Object(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::List(item), Value::Array(items)) => items.iter().all(|v| item.accepts(v)),
            (Self::Map(item), Value::Object(entries)) => entries.values().all(|v| item.accepts(v)),
            (Self::Optional(inner), other) => inner.accepts(other),
            _ => false,
        }
    }

    /// Value held by a field of this type when nothing was assigned to it.
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Any | Self::Null | Self::Optional(_) => Value::Null,
            Self::Bool => Value::Bool(false),
            Self::Integer => Value::from(0_i64),
            Self::Float => Value::from(0.0_f64),
            Self::String => Value::String(String::new()),
            Self::List(_) => Value::Array(Vec::new()),
            Self::Map(_) | Self::Object => Value::Object(serde_json::Map::new()),
        }
    }

    /// Wrap `self` in [`FieldType::Optional`].
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Wrap `self` in [`FieldType::List`].
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Value"),
            Self::Null => f.write_str("()"),
            Self::Bool => f.write_str("bool"),
            Self::Integer => f.write_str("i64"),
            Self::Float => f.write_str("f64"),
            Self::String => f.write_str("String"),
            Self::List(item) => write!(f, "Vec<{item}>"),
            Self::Map(item) => write!(f, "Map<String, {item}>"),
            Self::Object => f.write_str("Object"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// Rust types that can be stored in a record field.
///
/// `#[derive(Reflect)]` uses [`FieldValue::field_type`] for each exported
/// field's declared type and [`FieldValue::to_value`] for its current value.
/// The derive also implements this trait for the deriving struct, so
/// reflected structs nest as [`FieldType::Object`] values.
pub trait FieldValue {
    /// Declared type of fields holding `Self`.
    fn field_type() -> FieldType;

    /// Current value as a field value.
    fn to_value(&self) -> Value;
}
