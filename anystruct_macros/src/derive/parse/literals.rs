//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a string literal from an attribute, naming `key` in the error
/// when the value is some other literal.
///
/// # Examples
///
/// ```rust,ignore
/// # use syn::meta::ParseNestedMeta;
/// # fn demo(meta: &ParseNestedMeta) -> syn::Result<()> {
/// let s = lit_str(meta, "tag")?;
/// assert_eq!(s.value(), "json:\"n\"");
/// # Ok(())
/// # }
/// ```
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}
