//! Anonymous records composed at runtime from the public fields of existing
//! values.
//!
//! Two entry points converge on the same synthesis step:
//!
//! - [`merge`] collects the public fields of every record-shaped input
//!   (anything implementing [`Reflect`], usually through
//!   `#[derive(Reflect)]`) and keeps the last value supplied for each name.
//! - [`of`] builds a record from explicit [`FieldDescriptor`]s created with
//!   [`field`]; [`of_flat`] accepts the interleaved
//!   `name, value[, tag]` calling convention.
//!
//! The resulting [`Record`] owns a freshly built [`Shape`] whose fields are
//! sorted by name. Shapes are never cached: two calls describing the same
//! fields return equal, independent values.
//!
//! ```rust
//! use anystruct::{Reflect, field, merge, of, tag};
//!
//! #[derive(Reflect)]
//! struct Account {
//!     pub id: i64,
//!     #[anystruct(tag = "json:\"name\"")]
//!     pub name: String,
//!     password_hash: String,
//! }
//!
//! #[derive(Reflect)]
//! struct Usage {
//!     pub quota: u32,
//! }
//!
//! let account = Account {
//!     id: 7,
//!     name: "ada".to_owned(),
//!     password_hash: "x".to_owned(),
//! };
//! let view = merge(&[&account, &Usage { quota: 10 }]);
//! # let _ = &account.password_hash;
//!
//! let expected = of([
//!     field("id", 7, [])?,
//!     field("name", "ada", [tag("json:\"name\"")])?,
//!     field("quota", 10, [])?,
//! ]);
//! assert_eq!(view.names().collect::<Vec<_>>(), ["id", "name", "quota"]);
//! assert_eq!(view.get("password_hash"), None);
//! assert_eq!(view, expected);
//! # Ok::<_, anystruct::AnystructError>(())
//! ```

pub use anystruct_macros::Reflect;

// Lets `#[derive(Reflect)]` expand inside this crate's own tests.
extern crate self as anystruct;

mod collect;
mod descriptor;
mod error;
mod flat;
mod record;
mod synth;
mod value;

pub use collect::{FieldCollection, Reflect};
pub use descriptor::{FieldDescriptor, FieldOption, field, tag};
pub use error::{AnystructError, AnystructResult};
pub use flat::of_flat;
pub use anystruct_ident::{NameViolation, check_public_name, is_public_name};
pub use record::{FieldDef, Record, Shape};
pub use synth::synthesize;
pub use value::{FieldType, FieldValue};

/// Re-exports used by code generated from `#[derive(Reflect)]`.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::{Map, Value};
}

/// Synthesize a record from the public fields of `values`.
///
/// Values that are not record-shaped are ignored. An element may reach its
/// record through one reference or smart pointer (`&T`, `Box`, `Rc`, `Arc`,
/// `Option`); a pointer to a pointer is ignored. When two values declare a
/// field with the same name, the one appearing later in `values` wins
/// entirely: name, declared type, tag and value all come from it.
///
/// # Examples
///
/// ```rust
/// use anystruct::{Reflect, merge};
///
/// #[derive(Reflect)]
/// struct A {
///     pub n: i64,
/// }
///
/// #[derive(Reflect)]
/// struct B {
///     pub n: i64,
///     pub s: String,
/// }
///
/// let record = merge(&[&A { n: 1 }, &B { n: 2, s: "x".to_owned() }, &42]);
/// assert_eq!(record.get("n"), Some(&serde_json::json!(2)));
/// assert_eq!(record.len(), 2);
/// ```
#[must_use]
pub fn merge(values: &[&dyn Reflect]) -> Record {
    synthesize(FieldCollection::collect(values.iter().copied()))
}

/// Synthesize a record from an owned sequence of homogeneous values.
///
/// Behaves like [`merge`] for callers holding a collection of one type.
#[must_use]
pub fn merge_iter<I>(values: I) -> Record
where
    I: IntoIterator,
    I::Item: Reflect,
{
    let mut fields = FieldCollection::new();
    for value in values {
        fields.absorb(&value);
    }
    synthesize(fields)
}

/// Synthesize a record from explicit field descriptors.
///
/// Later descriptors replace earlier ones that share a name.
#[must_use]
pub fn of<I>(descriptors: I) -> Record
where
    I: IntoIterator<Item = FieldDescriptor>,
{
    synthesize(descriptors.into_iter().collect())
}

/// Synthesize a record from descriptors that may have failed to build.
///
/// The first error aborts the call. This is what [`record!`] expands to.
///
/// # Errors
///
/// Returns the first [`AnystructError`] yielded by `descriptors`.
pub fn try_of<I>(descriptors: I) -> AnystructResult<Record>
where
    I: IntoIterator<Item = AnystructResult<FieldDescriptor>>,
{
    let fields = descriptors
        .into_iter()
        .collect::<AnystructResult<FieldCollection>>()?;
    Ok(synthesize(fields))
}

/// Build a single [`FieldDescriptor`], optionally tagged.
///
/// ```rust
/// let plain = anystruct::field!("count", 3)?;
/// let tagged = anystruct::field!("count", 3, tag = "json:\"count\"")?;
/// assert_eq!(plain.tag(), None);
/// assert_eq!(tagged.tag(), Some("json:\"count\""));
/// # Ok::<_, anystruct::AnystructError>(())
/// ```
#[macro_export]
macro_rules! field {
    ($name:expr, $value:expr $(,)?) => {
        $crate::field($name, $value, [])
    };
    ($name:expr, $value:expr, tag = $tag:expr $(,)?) => {
        $crate::field($name, $value, [$crate::tag($tag)])
    };
}

/// Build a [`Record`] from `name: value` pairs with optional `=> tag`.
///
/// Evaluates to `AnystructResult<Record>`.
///
/// ```rust
/// let record = anystruct::record! {
///     n: 100,
///     s: "test" => "json:\"s\"",
/// }?;
/// assert_eq!(record.names().collect::<Vec<_>>(), ["n", "s"]);
/// assert_eq!(record.tag("s"), Some("json:\"s\""));
/// # Ok::<_, anystruct::AnystructError>(())
/// ```
#[macro_export]
macro_rules! record {
    () => {
        ::core::result::Result::<$crate::Record, $crate::AnystructError>::Ok(
            $crate::Record::empty(),
        )
    };
    ($($name:ident : $value:expr $(=> $tag:expr)?),+ $(,)?) => {
        $crate::try_of([
            $(
                $crate::field(
                    ::core::stringify!($name),
                    $value,
                    [$($crate::tag($tag))?],
                ),
            )+
        ])
    };
}
