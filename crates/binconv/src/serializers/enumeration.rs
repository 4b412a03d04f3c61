//! Field-less enums as the signed varint of their discriminant.

use std::{
    any::{Any, type_name},
    marker::PhantomData,
};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    serializer::{Serializer, downcast_ref},
    settings::SerializerArg,
    shape::Binary,
};

/// A field-less enum. Implemented by `#[derive(Binary)]`.
pub trait Enumeration: Binary + Sized {
    /// Returns the discriminant of the variant.
    fn discriminant(&self) -> i64;

    /// Returns the variant with the given discriminant.
    fn from_discriminant(discriminant: i64) -> Option<Self>;
}

/// Serializes an [`Enumeration`] as its discriminant.
pub struct EnumerationSerializer<T>(PhantomData<fn() -> T>);

impl<T> EnumerationSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for EnumerationSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Enumeration> Serializer for EnumerationSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_varint_i64(downcast_ref::<T>(value)?.discriminant())
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let discriminant = reader.read_varint_i64()?;

        match T::from_discriminant(discriminant) {
            Some(value) => Ok(Box::new(value)),
            None => Err(Error::malformed(format!(
                "{discriminant} is not a discriminant of `{}`",
                type_name::<T>()
            ))),
        }
    }
}
