//! Derive macro for the envfill configuration loader.
//!
//! This crate provides the `#[derive(Record)]` macro, which builds the
//! field-descriptor table envfill uses to populate a struct by field name.
//!
//! # Example
//!
//! ```ignore
//! use envfill::Record;
//!
//! #[derive(Default, Record)]
//! struct ServerConfig {
//!     #[envfill(rename = "SERVER_HOST")]
//!     host: String,
//!     #[envfill(skip)]
//!     port: u16,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Error, Fields, Ident, Type};

/// Derive the `Record` trait for a struct with named fields.
///
/// Every field becomes an entry in the descriptor table, keyed by the
/// field's name. `String` fields are assignable; fields of any other type
/// are described as unsupported and fail at load time if a value targets
/// them.
///
/// # Attributes
///
/// - `#[envfill(rename = "NAME")]` - Look the field up under a different key
/// - `#[envfill(skip)]` - Leave the field out of the table entirely
///
/// # Examples
///
/// ```ignore
/// use envfill::Record;
///
/// #[derive(Default, Record)]
/// struct DatabaseConfig {
///     #[envfill(rename = "DATABASE_URL")]
///     url: String,
///     #[envfill(skip)]
///     pool: Option<Pool>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(envfill))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_record_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_record_impl(input: DeriveInput) -> Result<TokenStream2, Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                name,
                "Record cannot be derived for enums",
            ))
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                name,
                "Record cannot be derived for unions",
            ))
        }
    };

    let fields = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                name,
                "Record cannot be derived for tuple structs",
            ))
        }
        Fields::Unit => Vec::new(),
    };

    let mut descriptors = Vec::new();

    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let key_name = attrs.rename.unwrap_or_else(|| unraw(field_name));

        let descriptor = if is_string_type(&field.ty) {
            quote! {
                envfill::record::Field::text(#key_name, |record: &mut Self, value| {
                    record.#field_name = value;
                })
            }
        } else {
            let type_name = type_to_string(&field.ty);
            quote! {
                envfill::record::Field::unsupported(#key_name, #type_name)
            }
        };

        descriptors.push(descriptor);
    }

    Ok(quote! {
        impl #impl_generics envfill::Record for #name #ty_generics #where_clause {
            fn shape() -> envfill::record::Shape<Self> {
                envfill::record::Shape::Struct(vec![
                    #(#descriptors),*
                ])
            }
        }
    })
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, Error> {
    let mut field_attrs = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("envfill") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                field_attrs.rename = Some(value.value());
            } else if meta.path.is_ident("skip") {
                field_attrs.skip = true;
            } else {
                return Err(meta.error("unsupported envfill attribute"));
            }
            Ok(())
        })?;
    }

    Ok(field_attrs)
}

/// Field name as written, without a leading `r#`.
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

fn is_string_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if type_path.qself.is_none() {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "String" && segment.arguments.is_empty();
            }
        }
    }
    false
}

/// Render a type for error messages, keeping spaces only where they separate words.
fn type_to_string(ty: &Type) -> String {
    const TIGHT: &[(&str, &str)] = &[
        (" ::", "::"),
        (":: ", "::"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        (", ", ","),
        ("& ", "&"),
        ("[ ", "["),
        (" ]", "]"),
        (" ;", ";"),
        ("( ", "("),
        (" )", ")"),
    ];

    let mut rendered = quote!(#ty).to_string();
    for (spaced, tight) in TIGHT {
        rendered = rendered.replace(spaced, tight);
    }
    rendered.replace(',', ", ")
}
