//! Parsing for the `Reflect` derive.
//!
//! Gathers the exported fields of the input struct together with their
//! `#[anystruct(...)]` metadata in one pass, so expansion fails fast with a
//! spanned error when the input cannot be reflected.

use std::collections::HashSet;

use syn::ext::IdentExt as _;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Token, Visibility, parenthesized};

mod literals;
mod rename;

use literals::lit_str;
pub(crate) use rename::RenameAll;

/// Struct-level `#[anystruct(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub rename_all: Option<RenameAll>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[anystruct(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub tag: Option<String>,
    pub rename: Option<LitStr>,
    pub skip: bool,
}

/// A field that surfaces in the reflected record.
pub(crate) struct ExportedField {
    pub member: syn::Ident,
    pub ty: syn::Type,
    pub name: String,
    pub tag: Option<String>,
}

/// Everything generation needs from the input struct.
pub(crate) struct ReflectInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub crate_path: syn::Path,
    pub fields: Vec<ExportedField>,
}

/// Iterate all `#[anystruct(...)]` attributes once and apply a callback.
fn parse_anystruct<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("anystruct")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[anystruct(...)]` metadata applied to a struct.
///
/// Unknown keys are ignored so callers keep compiling when new attributes
/// appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_anystruct(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename_all") => {
                let s = lit_str(meta, "rename_all")?;
                out.rename_all = Some(RenameAll::parse(&s)?);
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[anystruct(...)]` attributes.
///
/// Recognised keys are `tag`, `rename` and `skip`; unknown keys are
/// discarded like [`parse_struct_attrs`] does.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_anystruct(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("tag") => {
                out.tag = Some(lit_str(meta, "tag")?.value());
                Ok(())
            }
            Some("rename") => {
                out.rename = Some(lit_str(meta, "rename")?);
                Ok(())
            }
            Some("skip") => {
                out.skip = true;
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Gathers the struct identifier, generics, crate path and exported fields.
///
/// Fails on anything but a struct with named fields, on exported names that
/// are not public by convention, and on two fields exported under one name.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ReflectInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Reflect requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    let mut seen = HashSet::new();
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip || !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(member) = field.ident.clone() else {
            continue;
        };
        let exported = export_name(&member, &attrs, struct_attrs.rename_all)?;
        if !seen.insert(exported.clone()) {
            return Err(syn::Error::new_spanned(
                &member,
                format!("field name `{exported}` is exported more than once"),
            ));
        }
        fields.push(ExportedField {
            member,
            ty: field.ty.clone(),
            name: exported,
            tag: attrs.tag,
        });
    }

    Ok(ReflectInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        crate_path: struct_attrs
            .crate_path
            .unwrap_or_else(|| syn::parse_quote!(::anystruct)),
        fields,
    })
}

/// Name a field is exported under, validated against the public-name
/// convention.
fn export_name(
    member: &syn::Ident,
    attrs: &FieldAttrs,
    rename_all: Option<RenameAll>,
) -> syn::Result<String> {
    let (exported, span) = match (&attrs.rename, rename_all) {
        (Some(rename), _) => (rename.value(), rename.span()),
        (None, Some(rule)) => (rule.apply(&member.unraw().to_string()), member.span()),
        (None, None) => (member.unraw().to_string(), member.span()),
    };
    if let Err(reason) = anystruct_ident::check_public_name(&exported) {
        return Err(syn::Error::new(
            span,
            format!("field name `{exported}` is not public: {reason}"),
        ));
    }
    Ok(exported)
}
