//! Derive macro for the `Binary` trait.
//!
//! This crate provides `#[derive(Binary)]` for the `binconv` crate. It is
//! re-exported from there and should be used through it.
//!
//! # Supported Types
//!
//! - Structs with named fields, tuple structs and unit structs become
//!   *records*: their fields are serialized one after another in declaration
//!   order. The macro implements `Binary` and `Record`, generating the
//!   accessor table the class serializer walks.
//! - Enums whose variants carry no fields become *enumerations*, serialized
//!   as their discriminant. The macro implements `Binary` and `Enumeration`.
//!
//! Generic type parameters receive a `Binary` bound.
//!
//! # Examples
//!
//! ```ignore
//! use binconv::Binary;
//!
//! #[derive(Default, Binary)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Default, Binary)]
//! struct Id(u64);
//!
//! #[derive(Binary)]
//! enum Direction {
//!     North,
//!     East,
//!     South,
//!     West,
//! }
//! ```
//!
//! # Attributes
//!
//! ## `#[binary(ignore)]` (field)
//!
//! The field is left out of the record: it is not written, and on decode it
//! keeps the value the constructor gave it. Its type does not need to
//! implement `Binary`, and class maps do not see it as a member.
//!
//! ## `#[binary(constructor = path)]` (struct)
//!
//! Decoding starts from `path()` instead of `Default::default()`.
//!
//! ## `#[binary(no_constructor)]` (struct)
//!
//! The record has no zero-argument constructor. It can be serialized, but
//! deserializing it is an error.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Field, Fields, Index, Path,
    parse_macro_input,
};

/// How a record is constructed before its members are assigned.
enum Constructor {
    Default,
    Path(Path),
    None,
}

/// Parses the struct-level `#[binary(...)]` attributes.
fn parse_constructor(input: &DeriveInput) -> syn::Result<Constructor> {
    let mut constructor = Constructor::Default;

    for attr in &input.attrs {
        if !attr.path().is_ident("binary") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("constructor") {
                constructor = Constructor::Path(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("no_constructor") {
                constructor = Constructor::None;
                Ok(())
            } else {
                Err(meta.error("unknown binary attribute"))
            }
        })?;
    }

    Ok(constructor)
}

/// Checks if a field has the `#[binary(ignore)]` attribute.
fn is_ignored(field: &Field) -> syn::Result<bool> {
    let mut ignored = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("binary") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignored = true;
                Ok(())
            } else {
                Err(meta.error("unknown binary attribute"))
            }
        })?;
    }

    Ok(ignored)
}

/// Derive macro for `Binary`.
///
/// See the crate documentation for the supported types and attributes.
#[proc_macro_derive(Binary, attributes(binary))]
pub fn derive_binary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data_struct) => impl_record(&input, data_struct),
        Data::Enum(data_enum) => impl_enumeration(&input, data_enum),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input,
            "Binary cannot be derived for unions",
        )),
    };

    expanded.unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Builds the where clause with a `Binary` bound on every type parameter.
fn where_clause(input: &DeriveInput) -> syn::WhereClause {
    let mut where_clause = input
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(where));

    for param in &input.generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            let ident = &type_param.ident;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ident: ::binconv::Binary));
        }
    }

    where_clause
}

fn impl_record(
    input: &DeriveInput,
    data_struct: &DataStruct,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let mut where_clause = where_clause(input);

    let constructor = match parse_constructor(input)? {
        Constructor::Default => {
            where_clause
                .predicates
                .push(syn::parse_quote!(Self: ::core::default::Default));

            quote! {
                ::core::option::Option::Some(
                    <Self as ::core::default::Default>::default as fn() -> Self
                )
            }
        }
        Constructor::Path(path) => quote! {
            ::core::option::Option::Some(#path as fn() -> Self)
        },
        Constructor::None => quote! { ::core::option::Option::None },
    };

    let members: Vec<Option<_>> = match &data_struct.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .map(|field| {
                let ident = field.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(field, "expected a named field")
                })?;
                member_accessor(field, &ident.to_string(), &quote!(#ident))
            })
            .collect::<syn::Result<Vec<_>>>()?,

        Fields::Unnamed(fields) => fields
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let index = Index::from(i);
                member_accessor(field, &i.to_string(), &quote!(#index))
            })
            .collect::<syn::Result<Vec<_>>>()?,

        Fields::Unit => Vec::new(),
    };
    let members = members.into_iter().flatten().collect::<Vec<_>>();

    Ok(quote! {
        impl #impl_generics ::binconv::Binary for #name #ty_generics #where_clause {
            fn intrinsic_serializer() -> ::core::option::Option<
                ::std::sync::Arc<dyn ::binconv::Serializer>
            > {
                ::core::option::Option::Some(::std::sync::Arc::new(
                    ::binconv::serializers::class::ClassSerializer::<Self>::new(),
                ))
            }
        }

        impl #impl_generics ::binconv::Record for #name #ty_generics #where_clause {
            fn accessors() -> ::binconv::ClassAccessors<Self> {
                ::binconv::ClassAccessors::new(
                    #constructor,
                    ::std::vec![#(#members),*],
                )
            }
        }
    })
}

/// Generates the `MemberAccessor` of one field, accessed as
/// `record.#access`. Ignored fields get none.
fn member_accessor(
    field: &Field,
    name: &str,
    access: &proc_macro2::TokenStream,
) -> syn::Result<Option<proc_macro2::TokenStream>> {
    if is_ignored(field)? {
        return Ok(None);
    }

    let ty = &field.ty;

    Ok(Some(quote! {
        ::binconv::MemberAccessor::<Self>::new(
            #name,
            ::binconv::TypeToken::of::<#ty>(),
            |record| &record.#access as &dyn ::core::any::Any,
            |record, value| {
                record.#access = ::binconv::downcast_box::<#ty>(value)?;
                ::core::result::Result::Ok(())
            },
        )
    }))
}

fn impl_enumeration(
    input: &DeriveInput,
    data_enum: &DataEnum,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = where_clause(input);

    if let Some(variant) = data_enum
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "Binary can only be derived for enums whose variants have no \
             fields",
        ));
    }

    let variants = data_enum
        .variants
        .iter()
        .map(|variant| &variant.ident)
        .collect::<Vec<_>>();

    Ok(quote! {
        impl #impl_generics ::binconv::Binary for #name #ty_generics #where_clause {
            fn intrinsic_serializer() -> ::core::option::Option<
                ::std::sync::Arc<dyn ::binconv::Serializer>
            > {
                ::core::option::Option::Some(::std::sync::Arc::new(
                    ::binconv::serializers::enumeration::EnumerationSerializer::<Self>::new(),
                ))
            }
        }

        impl #impl_generics ::binconv::serializers::enumeration::Enumeration
            for #name #ty_generics #where_clause
        {
            #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
            fn discriminant(&self) -> i64 {
                match *self {
                    #(Self::#variants => Self::#variants as i64,)*
                }
            }

            #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
            fn from_discriminant(
                discriminant: i64,
            ) -> ::core::option::Option<Self> {
                #(
                    if discriminant == Self::#variants as i64 {
                        return ::core::option::Option::Some(Self::#variants);
                    }
                )*
                ::core::option::Option::None
            }
        }
    })
}
