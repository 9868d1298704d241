//! Collection of public fields from record-shaped values.
//!
//! [`Reflect`] is the introspection seam: it reports a value's declared
//! fields in declaration order, or `None` when the value is not a record.
//! [`FieldCollection`] gathers those fields by name with later writers
//! winning, ready for [`crate::synthesize`].

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{FieldDescriptor, FieldType, is_public_name};


/// Values whose public fields can be collected into a record.
///
/// Usually implemented with `#[derive(Reflect)]`, which exports exactly the
/// `pub` fields of a struct.
///
/// A reference or smart pointer (`&T`, `Box<T>`, `Rc<T>`, `Arc<T>`,
/// `Option<T>`) is resolved at most once: [`Reflect::reflect`] looks through
/// one pointer to the record behind it, while a pointer to a pointer is not
/// record-shaped. `None` counts as a missing record.
pub trait Reflect {
    /// Public fields of `self` itself in declaration order, or `None` when
    /// `self` is not a record. Pointers return `None` here.
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>>;

    /// Public fields of `self` after at most one dereference, or `None`
    /// when the value is not record-shaped.
    fn reflect(&self) -> Option<Vec<FieldDescriptor>> {
        self.reflect_fields()
    }

    /// Name of the reflected type, used in diagnostics.
    #[must_use]
    fn reflected_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! impl_not_a_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
                    None
                }
            }
        )+
    };
}

impl_not_a_record!(
    (), bool, char, str, String, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64,
    u128, usize,
);

impl<T> Reflect for [T] {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        None
    }
}

impl<T> Reflect for Vec<T> {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        None
    }
}

macro_rules! impl_pointer {
    ($($wrapper:ident),+ $(,)?) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $wrapper<T> {
                fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
                    None
                }

                fn reflect(&self) -> Option<Vec<FieldDescriptor>> {
                    T::reflect_fields(self)
                }

                fn reflected_type_name(&self) -> &'static str {
                    T::reflected_type_name(self)
                }
            }
        )+
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        None
    }

    fn reflect(&self) -> Option<Vec<FieldDescriptor>> {
        T::reflect_fields(self)
    }

    fn reflected_type_name(&self) -> &'static str {
        T::reflected_type_name(self)
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        None
    }

    fn reflect(&self) -> Option<Vec<FieldDescriptor>> {
        self.as_ref().and_then(T::reflect_fields)
    }

    fn reflected_type_name(&self) -> &'static str {
        self.as_ref()
            .map_or_else(std::any::type_name::<Self>, T::reflected_type_name)
    }
}

/// Objects are records whose fields are their entries; keys that are not
/// public by convention are skipped.
impl Reflect for Map<String, Value> {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        Some(
            self.iter()
                .filter(|(key, _)| is_public_name(key))
                .map(|(key, value)| {
                    FieldDescriptor::from_reflected(
                        key,
                        FieldType::of_value(value),
                        None,
                        value.clone(),
                    )
                })
                .collect(),
        )
    }
}

impl Reflect for Value {
    fn reflect_fields(&self) -> Option<Vec<FieldDescriptor>> {
        match self {
            Self::Object(map) => map.reflect_fields(),
            _ => None,
        }
    }
}

/// Descriptors keyed by field name, built by successive overwrite.
///
/// Iteration order is unspecified; synthesis sorts by name.
#[derive(Clone, Debug, Default)]
pub struct FieldCollection {
    fields: HashMap<String, FieldDescriptor>,
}

impl FieldCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    /// Collect the public fields of every value in order.
    #[must_use]
    pub fn collect<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn Reflect>,
    {
        let mut fields = Self::new();
        for value in values {
            fields.absorb(value);
        }
        fields
    }

    /// Insert or overwrite the fields of `value`.
    ///
    /// Returns `false`, leaving the collection untouched, when `value` is
    /// not record-shaped.
    pub fn absorb<T: Reflect + ?Sized>(&mut self, value: &T) -> bool {
        let Some(descriptors) = T::reflect(value) else {
            tracing::trace!(
                input = value.reflected_type_name(),
                "ignoring non-record input"
            );
            return false;
        };
        self.extend(descriptors);
        true
    }

    /// Insert `descriptor`, returning the one it replaced.
    pub fn insert(&mut self, descriptor: FieldDescriptor) -> Option<FieldDescriptor> {
        self.fields.insert(descriptor.name().to_owned(), descriptor)
    }

    /// Descriptor currently held for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Number of distinct field names collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no field has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the collection, returning descriptors sorted by name.
    #[must_use]
    pub fn into_sorted(self) -> Vec<FieldDescriptor> {
        let mut descriptors: Vec<_> = self.fields.into_values().collect();
        descriptors.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        descriptors
    }
}

impl Extend<FieldDescriptor> for FieldCollection {
    fn extend<I: IntoIterator<Item = FieldDescriptor>>(&mut self, iter: I) {
        for descriptor in iter {
            self.insert(descriptor);
        }
    }
}

impl FromIterator<FieldDescriptor> for FieldCollection {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}
