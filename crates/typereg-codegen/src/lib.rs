// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Type-level `#[typereg(...)]` options.
#[derive(Default)]
struct TypeOptions {
    /// `namespace = "..."`; defaults to the module path of the deriving type.
    namespace: Option<String>,
    /// `name = "..."`; defaults to the struct identifier.
    name: Option<String>,
}

/// Field-level `#[typereg(...)]` options.
#[derive(Default)]
struct FieldOptions {
    embed: bool,
    rename: Option<String>,
}

/// `#[derive(Described)]` macro: generates a `typereg::Described` impl.
///
/// The generated `type_descriptor` is a declared struct whose fields are
/// described through their own `Described::type_ref`, so a struct may refer
/// to itself through `Vec`, `Option<Box<_>>` or maps.
///
/// Attributes:
/// - `#[typereg(namespace = "pkg")]` on the struct (empty string for none)
/// - `#[typereg(name = "Other")]` on the struct
/// - `#[typereg(embed)]` on a field, rendered without its name
/// - `#[typereg(rename = "X")]` on a field
///
/// Example:
/// ```ignore
/// use typereg::Described;
///
/// #[derive(Described)]
/// #[typereg(namespace = "pkg")]
/// struct Tree {
///     value: i64,
///     children: Vec<Tree>,
/// }
/// ```
#[proc_macro_derive(Described, attributes(typereg))]
pub fn derive_described(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Described cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => f.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields or unit structs are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let options = parse_type_options(&input.attrs)?;
    let type_name = options.name.unwrap_or_else(|| ident.to_string());
    let namespace = match options.namespace {
        Some(ns) => quote! { #ns },
        None => quote! { ::core::module_path!() },
    };

    let mut field_tokens = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let ty = &field.ty;
        let opts = parse_field_options(&field.attrs)?;

        let descriptor = quote! { <#ty as ::typereg::Described>::type_ref() };
        field_tokens.push(if opts.embed {
            quote! { ::typereg::Field::embedded(#descriptor) }
        } else {
            let name = opts.rename.unwrap_or_else(|| field_ident.to_string());
            quote! { ::typereg::Field::new(#name, #descriptor) }
        });
    }

    Ok(quote! {
        impl ::typereg::Described for #ident {
            fn type_descriptor() -> ::typereg::TypeDescriptor {
                ::typereg::TypeDescriptor::named(
                    #namespace,
                    #type_name,
                    ::typereg::TypeDescriptor::structure([#(#field_tokens),*]),
                )
            }

            fn type_ref() -> ::typereg::TypeDescriptor {
                ::typereg::TypeDescriptor::reference(#namespace, #type_name)
            }
        }
    })
}

fn parse_type_options(attrs: &[Attribute]) -> syn::Result<TypeOptions> {
    let mut options = TypeOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("typereg")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                options.namespace = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("name") {
                let name = meta.value()?.parse::<LitStr>()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new_spanned(name, "type name must not be empty"));
                }
                options.name = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("expected `namespace` or `name`"))
            }
        })?;
    }
    Ok(options)
}

fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("typereg")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embed") {
                options.embed = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                options.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("expected `embed` or `rename`"))
            }
        })?;
    }
    if options.embed && options.rename.is_some() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "embedded fields take their type's name; `rename` does not apply",
        ));
    }
    Ok(options)
}
