//!
//! Procedural macros for the geolayers crate.
//!
//! `#[derive(Record)]` generates implementations of both `IntoRecord` and
//! `RecordSchema` for a struct with named fields, so typed values can be fed to a
//! layer as a dataset. Every field becomes a record field of the same name unless
//! it is annotated:
//!
//! - `#[record(name = "...")]` stores the field under another name, typically
//!   `coordinates` for the geometry.
//! - `#[record(skip)]` leaves the field out of the record.
//!
//! Field types must convert into `geolayers::layer::Value`.
//!
//! Examples
//! --------
//!
//! ```ignore
//! use geolayers::Record;
//!
//! #[derive(Record)]
//! struct Leg {
//!     #[record(name = "line")] ends: Vec<[f64; 2]>,
//!     length: f64,
//! }
//! ```
extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{ quote, ToTokens };
use syn::{ parse_macro_input, Data, DeriveInput, Fields };
use proc_macro_crate::{ crate_name, FoundCrate };

fn get_crate_name() -> proc_macro2::TokenStream {
    let found_crate = crate_name("geolayers");

    match found_crate {
        Ok(FoundCrate::Itself) => quote!(::geolayers),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::geolayers),
    }
}

struct RecordAttr {
    name: String,
    skip: bool,
}

/// Parses the `#[record(...)]` attributes of a field.
fn parse_record_attr(field: &syn::Field) -> Result<RecordAttr, syn::Error> {
    let ident = field.ident.as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record only supports named fields"))?;
    let mut attr_data = RecordAttr {
        name: ident.to_string(),
        skip: false,
    };

    for attr in &field.attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let s: syn::LitStr = value.parse()?;
                    if s.value().is_empty() {
                        return Err(syn::Error::new_spanned(s, "record field name must not be empty"));
                    }
                    attr_data.name = s.value();
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    attr_data.skip = true;
                    Ok(())
                } else {
                    Err(meta.error(format!("unknown record attribute: {}", meta.path.to_token_stream())))
                }
            })?;
        }
    }

    Ok(attr_data)
}

/// Derives `IntoRecord` and `RecordSchema`.
///
/// Fields are written in declaration order. Two fields mapped to the same record
/// name are rejected at compile time.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_record(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => return Err(syn::Error::new_spanned(&input.ident, "Record only supports named fields")),
        },
        _ => return Err(syn::Error::new_spanned(&input.ident, "Record only supports structs")),
    };

    let geolayers = get_crate_name();
    let mut inserts = Vec::new();
    let mut names = Vec::new();
    let mut seen_names = std::collections::HashSet::new();

    for field in fields {
        let attr = parse_record_attr(field)?;
        if attr.skip {
            continue;
        }
        if !seen_names.insert(attr.name.clone()) {
            return Err(syn::Error::new_spanned(field, format!("duplicate record field name: {}", attr.name)));
        }
        let field_name = &field.ident;
        let record_name = syn::LitStr::new(&attr.name, proc_macro2::Span::call_site());
        inserts.push(quote! {
            record.insert(
                ::std::string::String::from(#record_name),
                #geolayers::layer::Value::from(self.#field_name),
            );
        });
        names.push(record_name);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #geolayers::layer::IntoRecord for #name #ty_generics #where_clause {
            fn into_record(self) -> #geolayers::layer::DefaultRecord {
                #[allow(unused_mut)]
                let mut record = #geolayers::layer::DefaultRecord::new();
                #(#inserts)*
                record
            }
        }

        impl #impl_generics #geolayers::layer::RecordSchema for #name #ty_generics #where_clause {
            fn field_names() -> ::std::vec::Vec<&'static str> {
                ::std::vec![#(#names),*]
            }
        }
    })
}

#[cfg(test)]
mod tests;
