//! The naming convention that marks a record field as exported.
//!
//! A field name is public when it is a Rust identifier (an `XID_Start`
//! character or `_`, followed by `XID_Continue` characters) that does not
//! start with an underscore and is not a reserved word. Leading underscores
//! are how Rust code marks bindings as private or unused, so such fields
//! never surface in a synthesized record.
//!
//! Both the runtime crate and `#[derive(Reflect)]` check names through this
//! crate, so a name the derive accepts is always one `anystruct::field`
//! accepts too.

use thiserror::Error;
use unicode_ident::{is_xid_continue, is_xid_start};

/// Keywords that cannot name a field without raw-identifier syntax.
pub const RESERVED: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Reason a name fails the public-name convention.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum NameViolation {
    /// The name is empty.
    #[error("name is empty")]
    Empty,
    /// A non-string value was supplied where a name was expected.
    #[error("name is not a string")]
    NotAString,
    /// The name contains characters an identifier cannot hold.
    #[error("name is not an identifier")]
    NotIdentifier,
    /// The name starts with `_` and is therefore private.
    #[error("name starts with an underscore")]
    Private,
    /// The name is a reserved keyword.
    #[error("name is a reserved keyword")]
    Reserved,
}

/// Check `name` against the public-name convention.
///
/// # Errors
///
/// Returns the first [`NameViolation`] found.
///
/// # Examples
///
/// ```rust
/// use anystruct_ident::{NameViolation, check_public_name};
///
/// assert_eq!(check_public_name("total"), Ok(()));
/// assert_eq!(check_public_name("_total"), Err(NameViolation::Private));
/// assert_eq!(check_public_name("total-count"), Err(NameViolation::NotIdentifier));
/// ```
pub fn check_public_name(name: &str) -> Result<(), NameViolation> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(NameViolation::Empty);
    };
    if !(is_xid_start(first) || first == '_') || !chars.all(is_xid_continue) {
        return Err(NameViolation::NotIdentifier);
    }
    if first == '_' {
        return Err(NameViolation::Private);
    }
    if RESERVED.contains(&name) {
        return Err(NameViolation::Reserved);
    }
    Ok(())
}

/// Returns `true` when `name` is exported by convention.
#[must_use]
pub fn is_public_name(name: &str) -> bool {
    check_public_name(name).is_ok()
}
