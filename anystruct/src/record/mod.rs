//! Synthesized records and their shapes.
//!
//! A [`Shape`] is the type a synthesis call builds: field definitions sorted
//! by name. A [`Record`] pairs one shape with the values assigned to it and
//! never changes after construction.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::{AnystructError, AnystructResult, FieldDescriptor, FieldType, FieldValue, Reflect};


/// Definition of one field in a [`Shape`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FieldDef {
    name: String,
    declared_type: FieldType,
    tag: Option<String>,
}

impl FieldDef {
    pub(crate) const fn new(name: String, declared_type: FieldType, tag: Option<String>) -> Self {
        Self {
            name,
            declared_type,
            tag,
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    /// Opaque tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.declared_type)?;
        if let Some(tag) = &self.tag {
            write!(f, " `{tag}`")?;
        }
        Ok(())
    }
}

/// The synthesized record type: field definitions in ascending name order.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Shape {
    fields: Vec<FieldDef>,
}

impl Shape {
    /// Callers supply `fields` already sorted by name with unique names.
    pub(crate) const fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// Field definitions in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for the empty shape.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .binary_search_by(|def| def.name.as_str().cmp(name))
            .ok()
    }

    /// Definition of the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.position(name).and_then(|index| self.fields.get(index))
    }

    /// Render the shape as a struct-like type description.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("struct {}");
        }
        f.write_str("struct { ")?;
        for (index, def) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{def}")?;
        }
        f.write_str(" }")
    }
}

/// An anonymous record built by [`crate::merge`], [`crate::of`] or
/// [`crate::of_flat`].
///
/// Equality is structural: two records are equal when their shapes and
/// values are equal, whichever call built them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    shape: Shape,
    values: Vec<Value>,
}

impl Record {
    /// The record with no fields.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            shape: Shape::new(Vec::new()),
            values: Vec::new(),
        }
    }

    /// `values` must line up with `shape.fields()`.
    pub(crate) fn from_parts(shape: Shape, values: Vec<Value>) -> Self {
        debug_assert_eq!(shape.len(), values.len(), "one value per field");
        Self { shape, values }
    }

    /// The record's type.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.shape.len()
    }

    /// Returns `true` when the record has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shape.fields.iter().map(FieldDef::name)
    }

    /// Field definitions paired with their values, in order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDef, &Value)> {
        self.shape.fields.iter().zip(&self.values)
    }

    /// Value of the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shape
            .position(name)
            .and_then(|index| self.values.get(index))
    }

    /// Tag of the field called `name`.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.shape.get(name).and_then(FieldDef::tag)
    }

    /// Declared type of the field called `name`.
    #[must_use]
    pub fn field_type(&self, name: &str) -> Option<&FieldType> {
        self.shape.get(name).map(FieldDef::declared_type)
    }

    /// Decode the field called `name` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AnystructError::MissingField`] when the record has no such
    /// field and [`AnystructError::Decode`] when the value does not
    /// deserialize into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let record = anystruct::record! { n: 100, s: "test" }?;
    /// let n: u16 = record.get_as("n")?;
    /// assert_eq!(n, 100);
    /// assert!(record.get_as::<u16>("s").is_err());
    /// # Ok::<_, anystruct::AnystructError>(())
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> AnystructResult<T> {
        let value = self
            .get(name)
            .ok_or_else(|| AnystructError::MissingField {
                name: name.to_owned(),
            })?;
        T::deserialize(value).map_err(|err| AnystructError::decode_field(name, err))
    }

    /// Decode the whole record into `T`, such as a concrete struct with the
    /// same fields.
    ///
    /// # Errors
    ///
    /// Returns [`AnystructError::Decode`] with the path of the first value
    /// that fails.
    pub fn deserialize<T: DeserializeOwned>(&self) -> AnystructResult<T> {
        serde_path_to_error::deserialize(self.to_value()).map_err(AnystructError::decode)
    }

    /// The record as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Consume the record, returning it as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        let map: Map<String, Value> = self
            .shape
            .fields
            .into_iter()
            .map(|def| def.name)
            .zip(self.values)
            .collect();
        Value::Object(map)
    }

    fn to_map(&self) -> Map<String, Value> {
        self.fields()
            .map(|(def, value)| (def.name.clone(), value.clone()))
            .collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.shape)?;
        for (index, (def, value)) in self.fields().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {value}", def.name)?;
        }
        if self.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (def, value) in self.fields() {
            map.serialize_entry(def.name(), value)?;
        }
        map.end()
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Records nest into other records as objects.
impl FieldValue for Record {
    fn field_type() -> FieldType {
        FieldType::Object
    }

    fn to_value(&self) -> Value {
        Self::to_value(self)
    }
}

/// Records can be merged again; their fields keep declared types and tags.
impl Reflect for Record {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        Some(
            self.fields()
                .map(|(def, value)| {
                    FieldDescriptor::from_reflected(
                        &def.name,
                        def.declared_type.clone(),
                        def.tag(),
                        value.clone(),
                    )
                })
                .collect(),
        )
    }
}
