//! [`FieldValue`] implementations for standard library types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{FieldType, FieldValue};

macro_rules! impl_scalar {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::$kind
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )+
    };
}

impl_scalar!(Bool => bool);
impl_scalar!(Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
// Non-finite floats become `null`, which a `Float` field rejects.
impl_scalar!(Float => f32, f64);

impl FieldValue for char {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FieldValue for str {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for () {
    fn field_type() -> FieldType {
        FieldType::Null
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl FieldValue for Value {
    fn field_type() -> FieldType {
        FieldType::Any
    }

    fn to_value(&self) -> Self {
        self.clone()
    }
}

impl FieldValue for Map<String, Value> {
    fn field_type() -> FieldType {
        FieldType::Object
    }

    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_type() -> FieldType {
        T::field_type().optional()
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn field_type() -> FieldType {
        T::field_type().list()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(T::to_value).collect())
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn field_type() -> FieldType {
        <[T]>::field_type()
    }

    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn field_type() -> FieldType {
        FieldType::Map(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }
}

impl<T: FieldValue, S: BuildHasher> FieldValue for HashMap<String, T, S> {
    fn field_type() -> FieldType {
        FieldType::Map(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }
}

macro_rules! impl_forward {
    ($($wrapper:ident),+ $(,)?) => {
        $(
            impl<T: FieldValue + ?Sized> FieldValue for $wrapper<T> {
                fn field_type() -> FieldType {
                    T::field_type()
                }

                fn to_value(&self) -> Value {
                    T::to_value(self)
                }
            }
        )+
    };
}

impl_forward!(Box, Rc, Arc);

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }
}
