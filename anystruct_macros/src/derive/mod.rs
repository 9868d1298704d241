//! Expansion of `#[derive(Reflect)]`.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and generate the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let reflected = parse::parse_input(input)?;
    Ok(generate::generate(&reflected))
}
