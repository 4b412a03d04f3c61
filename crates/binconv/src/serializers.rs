//! The built-in serializers, one module per shape.
//!
//! Each module also implements [`Binary`](crate::Binary) for the standard
//! and third-party types of its shape, so those types resolve to their
//! serializer without any registration:
//!
//! | Module | Types |
//! |---|---|
//! | [`primitive`] | `bool`, `char`, integers, `f32`, `f64`, `Decimal` |
//! | [`string`] | `String` |
//! | [`nullable`] | `Option<T>` |
//! | [`boxed`] | `Box<T>` |
//! | [`array`] | `Vec<T>`, `VecDeque<T>`, `Vec<u8>` as a byte block |
//! | [`dictionary`] | `HashMap<K, V, S>`, `BTreeMap<K, V>` |
//! | [`set`] | `HashSet<T, S>`, `BTreeSet<T>` |
//! | [`tuple`] | tuples of arity 1 to 12 |
//! | [`guid`] | `Uuid` |
//! | [`time`] | `NaiveDateTime`, `DateTime<Utc>`, `TimeDelta` |
//!
//! [`class`] and [`enumeration`] serve types deriving `Binary`.

pub mod array;
pub mod boxed;
pub mod class;
pub mod container;
pub mod dictionary;
pub mod enumeration;
pub mod guid;
pub mod nullable;
pub mod primitive;
pub mod set;
pub mod string;
pub mod time;
pub mod tuple;
