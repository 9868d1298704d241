//! Unit tests for the generated trait implementations.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, ImplItem, Item, ItemImpl, parse_quote};

use super::generate;
use crate::derive::parse::parse_input;

fn expand(input: &DeriveInput) -> Result<Vec<ItemImpl>> {
    let parsed = parse_input(input).map_err(|err| anyhow!("parse failed: {err}"))?;
    let tokens = generate(&parsed);
    let file: syn::File =
        syn::parse2(tokens).map_err(|err| anyhow!("generated code does not parse: {err}"))?;
    file.items
        .into_iter()
        .map(|item| match item {
            Item::Impl(item_impl) => Ok(item_impl),
            _ => Err(anyhow!("expected only impl blocks")),
        })
        .collect()
}

fn trait_name(item: &ItemImpl) -> Option<String> {
    let (_, path, _) = item.trait_.as_ref()?;
    path.segments.last().map(|segment| segment.ident.to_string())
}

fn method_body(item: &ItemImpl, method: &str) -> Option<String> {
    item.items.iter().find_map(|impl_item| match impl_item {
        ImplItem::Fn(function) if function.sig.ident == method => {
            Some(quote::quote!(#function).to_string())
        }
        _ => None,
    })
}

#[rstest]
fn implements_both_traits() -> Result<()> {
    let impls = expand(&parse_quote! {
        struct Demo {
            pub n: i64,
        }
    })?;
    let names: Vec<_> = impls.iter().filter_map(trait_name).collect();
    ensure!(names == ["Reflect", "FieldValue"], "unexpected impls {names:?}");
    Ok(())
}

#[rstest]
fn reflect_lists_exported_fields_with_tags() -> Result<()> {
    let impls = expand(&parse_quote! {
        struct Demo {
            #[anystruct(tag = "json:\"n\"")]
            pub n: i64,
            hidden: u8,
            pub s: String,
        }
    })?;
    let reflect = impls
        .first()
        .and_then(|item| method_body(item, "reflect_fields"))
        .ok_or_else(|| anyhow!("missing reflect_fields method"))?;
    ensure!(reflect.contains("\"n\""), "n missing: {reflect}");
    ensure!(reflect.contains("\"s\""), "s missing: {reflect}");
    ensure!(!reflect.contains("hidden"), "private field leaked: {reflect}");
    ensure!(
        reflect.contains("Some (\"json:\\\"n\\\"\")"),
        "tag missing: {reflect}"
    );
    let n_at = reflect.find("\"n\"").ok_or_else(|| anyhow!("n missing"))?;
    let s_at = reflect.find("\"s\"").ok_or_else(|| anyhow!("s missing"))?;
    ensure!(n_at < s_at, "declaration order lost");
    Ok(())
}

#[rstest]
fn generic_field_types_gain_bounds() -> Result<()> {
    let impls = expand(&parse_quote! {
        struct Wrapper<T> {
            pub inner: T,
        }
    })?;
    let reflect = impls.first().ok_or_else(|| anyhow!("missing impl"))?;
    let where_clause = reflect
        .generics
        .where_clause
        .as_ref()
        .ok_or_else(|| anyhow!("missing where clause"))?;
    let rendered = quote::quote!(#where_clause).to_string();
    ensure!(
        rendered == "where T : :: anystruct :: FieldValue",
        "unexpected bounds {rendered}"
    );
    Ok(())
}

#[rstest]
fn empty_structs_build_empty_objects() -> Result<()> {
    let impls = expand(&parse_quote! {
        struct Empty {}
    })?;
    let to_value = impls
        .get(1)
        .and_then(|item| method_body(item, "to_value"))
        .ok_or_else(|| anyhow!("missing to_value method"))?;
    ensure!(!to_value.contains("let mut map"), "unused map: {to_value}");
    ensure!(to_value.contains("Map :: new ()"), "no object built: {to_value}");
    Ok(())
}

#[rstest]
fn crate_override_is_used() -> Result<()> {
    let impls = expand(&parse_quote! {
        #[anystruct(crate = "renamed")]
        struct Demo {
            pub n: i64,
        }
    })?;
    let item = impls.first().ok_or_else(|| anyhow!("missing impl"))?;
    let rendered = quote::quote!(#item).to_string();
    ensure!(rendered.contains("impl renamed :: Reflect"), "unexpected impl {rendered}");
    ensure!(!rendered.contains(":: anystruct"), "default path leaked: {rendered}");
    Ok(())
}
