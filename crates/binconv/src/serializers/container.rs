//! Count-prefixed containers.
//!
//! Arrays, dictionaries and sets share one layout: a length prefix holding
//! the entry count (or `-1` for an absent container), followed by the
//! entries in iteration order. [`ContainerSerializer`] owns the prefix and
//! null handling; each container type only describes how its entries are
//! written and collected through the [`Container`] trait.

use std::{any::Any, marker::PhantomData, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::Result,
    serializer::{Serializer, downcast_box, downcast_ref, unexpected_null},
    settings::SerializerArg,
    shape::{Binary, TypeToken},
};

/// A type serialized as a count followed by its entries.
pub trait Container: Any + Sized {
    /// Returns the number of entries written by
    /// [`write_entries`](Container::write_entries).
    fn count(&self) -> usize;

    /// Writes every entry, in iteration order.
    ///
    /// # Errors
    ///
    /// Propagates failures of the entries' serializers.
    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()>;

    /// Reads `count` entries into a new container, in read order.
    ///
    /// # Errors
    ///
    /// Propagates failures of the entries' serializers.
    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self>;
}

/// Serializes a [`Container`], using the `-1` count for `None`.
pub struct ContainerSerializer<C>(PhantomData<fn() -> C>);

impl<C> ContainerSerializer<C> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<C> Default for ContainerSerializer<C> {
    fn default() -> Self { Self::new() }
}

impl<C: Container> Serializer for ContainerSerializer<C> {
    fn common_null_handle(&self) -> bool { false }

    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        dispatcher: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let container = downcast_ref::<C>(value)?;

        writer.write_length(Some(container.count()))?;
        container.write_entries(writer, dispatcher)
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let count = reader.read_length()?.ok_or_else(unexpected_null::<C>)?;

        Ok(Box::new(C::read_entries(count, reader, dispatcher)?))
    }

    fn serialize_nullable(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: Option<&dyn Any>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        match value {
            Some(value) => self.serialize(writer, value, dispatcher, argument),
            None => writer.write_length(None),
        }
    }

    fn deserialize_nullable(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        let Some(count) = reader.read_length()? else {
            return Ok(None);
        };

        Ok(Some(Box::new(C::read_entries(count, reader, dispatcher)?)))
    }
}

/// The serializer of a container's element type, resolved once per
/// container rather than once per element.
pub struct Element<T> {
    token: TypeToken,
    serializer: Arc<dyn Serializer>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Binary> Element<T> {
    /// Resolves the serializer of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`](crate::Error::UnsupportedType) if
    /// `T` has no serializer.
    pub fn resolve(dispatcher: &Dispatcher<'_>) -> Result<Self> {
        let token = TypeToken::of::<T>();

        Ok(Self {
            token,
            serializer: dispatcher.resolve(token)?,
            _marker: PhantomData,
        })
    }

    /// Writes one element.
    ///
    /// # Errors
    ///
    /// Propagates the element serializer's failure.
    pub fn write(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &T,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        dispatcher.serialize_object(
            self.token,
            value,
            writer,
            Some(self.serializer.as_ref()),
            None,
        )
    }

    /// Reads one element.
    ///
    /// # Errors
    ///
    /// Propagates the element serializer's failure.
    pub fn read(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<T> {
        downcast_box(dispatcher.deserialize_object(
            self.token,
            reader,
            Some(self.serializer.as_ref()),
            None,
        )?)
    }
}
