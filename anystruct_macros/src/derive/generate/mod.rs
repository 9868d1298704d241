//! Token generation for `#[derive(Reflect)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{ExportedField, ReflectInput};

#[cfg(test)]
mod tests;

/// Generate the `Reflect` and `FieldValue` implementations.
///
/// Every exported field type gains a `FieldValue` bound in the where clause,
/// so generic structs reflect whenever their field types do.
pub(crate) fn generate(input: &ReflectInput) -> TokenStream {
    let ReflectInput {
        ident,
        generics,
        crate_path,
        fields,
    } = input;

    let mut bounded = generics.clone();
    let bounds = bounded.make_where_clause();
    for field in fields {
        let ty = &field.ty;
        bounds
            .predicates
            .push(syn::parse_quote!(#ty: #crate_path::FieldValue));
    }
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let descriptors = fields.iter().map(|field| descriptor_tokens(crate_path, field));
    let object = object_tokens(crate_path, fields);

    quote! {
        impl #impl_generics #crate_path::Reflect for #ident #ty_generics #where_clause {
            fn reflect_fields(
                &self,
            ) -> ::core::option::Option<::std::vec::Vec<#crate_path::FieldDescriptor>> {
                ::core::option::Option::Some(::std::vec![#(#descriptors),*])
            }
        }

        impl #impl_generics #crate_path::FieldValue for #ident #ty_generics #where_clause {
            fn field_type() -> #crate_path::FieldType {
                #crate_path::FieldType::Object
            }

            fn to_value(&self) -> #crate_path::__private::Value {
                #object
            }
        }
    }
}

fn descriptor_tokens(crate_path: &syn::Path, field: &ExportedField) -> TokenStream {
    let ExportedField {
        member,
        ty,
        name,
        tag,
    } = field;
    let tag_tokens = tag.as_ref().map_or_else(
        || quote! { ::core::option::Option::None },
        |text| quote! { ::core::option::Option::Some(#text) },
    );
    quote! {
        #crate_path::FieldDescriptor::from_reflected(
            #name,
            <#ty as #crate_path::FieldValue>::field_type(),
            #tag_tokens,
            <#ty as #crate_path::FieldValue>::to_value(&self.#member),
        )
    }
}

/// Object value of the exported fields, in declaration order.
fn object_tokens(crate_path: &syn::Path, fields: &[ExportedField]) -> TokenStream {
    if fields.is_empty() {
        return quote! {
            #crate_path::__private::Value::Object(#crate_path::__private::Map::new())
        };
    }
    let entries = fields.iter().map(|field| {
        let ExportedField {
            member, ty, name, ..
        } = field;
        quote! {
            map.insert(
                ::std::string::String::from(#name),
                <#ty as #crate_path::FieldValue>::to_value(&self.#member),
            );
        }
    });
    quote! {
        let mut map = #crate_path::__private::Map::new();
        #(#entries)*
        #crate_path::__private::Value::Object(map)
    }
}
