//! Procedural macros for `anystruct`.
//!
//! `#[derive(Reflect)]` generates the field introspection the runtime crate
//! needs to collect a struct's public fields: declaration order, visibility,
//! declared type, tag and current value.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `anystruct::Reflect` and `anystruct::FieldValue` for a struct with
/// named fields.
///
/// Only fields declared exactly `pub` are exported. Field attributes:
///
/// - `#[anystruct(tag = "...")]` attaches an opaque tag;
/// - `#[anystruct(rename = "...")]` exports the field under another name;
/// - `#[anystruct(skip)]` hides a public field.
///
/// Struct attributes:
///
/// - `#[anystruct(rename_all = "...")]` applies a case convention to every
///   exported name (`lowercase`, `UPPERCASE`, `PascalCase`, `camelCase`,
///   `snake_case` or `SCREAMING_SNAKE_CASE`);
/// - `#[anystruct(crate = "path")]` overrides the path of the runtime crate.
///
/// Exported names must be public by convention: identifiers that do not
/// start with `_` and are not reserved words.
#[proc_macro_derive(Reflect, attributes(anystruct))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    derive::expand(&derive_input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
