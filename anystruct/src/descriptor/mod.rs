//! Field descriptors: the unit a record is composed from.

use serde_json::Value;

use crate::{AnystructError, AnystructResult, FieldType, FieldValue, check_public_name};


/// One field awaiting synthesis: its name, declared type, tag and value.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    declared_type: FieldType,
    tag: Option<String>,
    value: Value,
}

/// Modifier applied by [`field`] after the descriptor is built.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FieldOption {
    /// Attach an opaque tag, such as serialization hints.
    Tag(String),
}

/// Attach `tag` verbatim to a field built with [`field`].
///
/// The tag is never parsed; downstream consumers decide what it means.
#[must_use]
pub fn tag(tag: impl Into<String>) -> FieldOption {
    FieldOption::Tag(tag.into())
}

/// Build a descriptor for a field called `name` holding `value`.
///
/// The declared type is the static type of `value`
/// ([`FieldValue::field_type`]), the same type a struct field holding
/// `value` reports through `#[derive(Reflect)]`.
///
/// # Errors
///
/// Returns [`AnystructError::InvalidFieldName`] when `name` is not public by
/// convention (see [`check_public_name`]).
///
/// # Examples
///
/// ```rust
/// use anystruct::{FieldType, field, tag};
///
/// let descriptor = field("count", 3, [tag("json:\"count\"")])?;
/// assert_eq!(descriptor.declared_type(), &FieldType::Integer);
///
/// let roles = field("roles", vec!["admin"], [])?;
/// assert_eq!(roles.declared_type(), &FieldType::String.list());
/// assert!(field("_count", 3, []).is_err());
/// # Ok::<_, anystruct::AnystructError>(())
/// ```
pub fn field<T: FieldValue>(
    name: impl Into<String>,
    value: T,
    options: impl IntoIterator<Item = FieldOption>,
) -> AnystructResult<FieldDescriptor> {
    let descriptor = FieldDescriptor::new(name, value)?;
    Ok(options
        .into_iter()
        .fold(descriptor, |acc, option| option.apply(acc)))
}

impl FieldOption {
    fn apply(self, descriptor: FieldDescriptor) -> FieldDescriptor {
        match self {
            Self::Tag(tag) => descriptor.with_tag(tag),
        }
    }
}

impl FieldDescriptor {
    /// Build an untagged descriptor declared with the static type of
    /// `value`, validating `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AnystructError::InvalidFieldName`] when `name` is not public
    /// by convention.
    pub fn new<T: FieldValue>(name: impl Into<String>, value: T) -> AnystructResult<Self> {
        Self::validated(name.into(), T::field_type(), value.to_value())
    }

    /// Build an untagged descriptor for an untyped JSON value, declared with
    /// the value's runtime type ([`FieldType::of_value`]).
    ///
    /// This is how [`crate::of_flat`] reads its arguments. Prefer
    /// [`FieldDescriptor::new`] for Rust values: a `Vec<String>` holding no
    /// elements still declares `List(String)` there.
    ///
    /// # Errors
    ///
    /// Returns [`AnystructError::InvalidFieldName`] when `name` is not public
    /// by convention.
    pub fn from_json(name: impl Into<String>, value: Value) -> AnystructResult<Self> {
        let declared_type = FieldType::of_value(&value);
        Self::validated(name.into(), declared_type, value)
    }

    fn validated(name: String, declared_type: FieldType, value: Value) -> AnystructResult<Self> {
        if let Err(reason) = check_public_name(&name) {
            return Err(AnystructError::InvalidFieldName { name, reason });
        }
        Ok(Self {
            name,
            declared_type,
            tag: None,
            value,
        })
    }

    /// Descriptor for a field whose name was validated at compile time.
    ///
    /// Used by `#[derive(Reflect)]`, which rejects non-public names while
    /// expanding.
    #[doc(hidden)]
    #[must_use]
    pub fn from_reflected(
        name: &str,
        declared_type: FieldType,
        tag: Option<&str>,
        value: Value,
    ) -> Self {
        Self {
            name: name.to_owned(),
            declared_type,
            tag: tag.map(str::to_owned),
            value,
        }
    }

    /// Replace the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Replace the declared type.
    ///
    /// A value the new type does not accept is not an error: synthesis
    /// leaves such fields at [`FieldType::zero_value`].
    #[must_use]
    pub fn with_declared_type(mut self, declared_type: FieldType) -> Self {
        self.declared_type = declared_type;
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type of the field.
    #[must_use]
    pub const fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    /// Tag attached to the field, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Value to assign.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (String, FieldType, Option<String>, Value) {
        (self.name, self.declared_type, self.tag, self.value)
    }
}
