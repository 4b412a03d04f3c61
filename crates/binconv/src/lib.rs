//! Type-driven binary serialization.
//!
//! This crate turns a value of a statically known type into a compact byte
//! sequence and back. The bytes carry no type information, no field names
//! and no schema version: the decoder must ask for exactly the type the
//! encoder used. In exchange payloads are small and encoding is a direct
//! walk over the value.
//!
//! # Overview
//!
//! - [`Binary`]: implemented by every serializable type. It declares the
//!   type's *intrinsic shape*, the [`Serializer`] used for it.
//! - [`Serializer`]: the object-safe contract each shape implements. The
//!   built-in ones live in [`serializers`].
//! - [`Dispatcher`]: the recursion point. Serializers hand nested values
//!   back to it, and it resolves the serializer and argument for them.
//! - [`SerializerRegistry`]: the concurrent cache of resolved serializers,
//!   registered fallback serializers and per-record [`ClassMap`]s.
//! - [`SerializerSettings`]: per-operation arguments keyed by type, such as
//!   the precision of date/time values.
//!
//! # Derive Macro
//!
//! Records and field-less enums derive [`Binary`]:
//!
//! ```ignore
//! use binconv::Binary;
//!
//! #[derive(Default, Binary)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     #[binary(ignore)]
//!     cache: Vec<u8>, // not written, left at its default when decoding
//! }
//!
//! #[derive(Binary)]
//! enum Color {
//!     Red,
//!     Green = 4,
//! }
//! ```
//!
//! Records are decoded by constructing an instance with `Default::default`
//! and assigning each member. `#[binary(constructor = path)]` names another
//! zero-argument constructor; `#[binary(no_constructor)]` declares a record
//! that can only be encoded.
//!
//! # Example
//!
//! ```ignore
//! use binconv::{SerializerSettings, serializers::time::DateTimeArg};
//! use chrono::NaiveDateTime;
//!
//! let settings = SerializerSettings::new()
//!     .with_argument::<NaiveDateTime>(DateTimeArg::SECONDS);
//!
//! let bytes = binconv::serialize(&person, Some(&settings))?;
//! let decoded: Person = binconv::deserialize(&bytes, Some(&settings))?;
//! ```
//!
//! # Recursion
//!
//! Values are encoded by plain recursion: there is no depth limit and no
//! cycle detection, and shared references are encoded once per occurrence.

extern crate self as binconv;

pub mod class_map;
pub mod codec;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod record;
pub mod registry;
pub mod serializer;
pub mod serializers;
pub mod settings;
pub mod shape;

pub use binconv_derive::Binary;
pub use class_map::{ClassMap, MemberMap};
pub use convert::{
    deserialize, deserialize_dyn, deserialize_from, serialize, serialize_dyn,
    serialize_into,
};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use record::{ClassAccessors, MemberAccessor, Record};
pub use registry::SerializerRegistry;
pub use serializer::{Serializer, downcast_box, downcast_ref};
pub use settings::{SerializerArg, SerializerSettings};
pub use shape::{Binary, TypeToken};
