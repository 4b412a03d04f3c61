//! `Option<T>`, the only way a value can be absent.
//!
//! The nullable serializer hands the inner value to the dispatcher as a
//! *nullable* value, and the inner type's serializer decides how absence is
//! encoded. Types in the common null envelope get a presence byte; strings,
//! byte blocks and containers use their `-1` length prefix.
//!
//! An `Option` nested in another `Option` is itself in the common envelope,
//! so every layer carries its own marker: `Some(None)` and `None` stay
//! distinct.

use std::{any::Any, marker::PhantomData, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::Result,
    serializer::{Serializer, downcast_box, downcast_ref},
    settings::SerializerArg,
    shape::{Binary, TypeToken},
};

/// Serializes `Option<T>` through the null handling of `T`'s serializer.
///
/// The argument given to the nullable value is passed on to `T`'s
/// serializer; without one, the settings entry for `T` applies.
pub struct NullableSerializer<T>(PhantomData<fn() -> T>);

impl<T> NullableSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for NullableSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Binary> NullableSerializer<T> {
    fn write(
        writer: &mut BinaryWriter<'_>,
        value: Option<&T>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        dispatcher.serialize_nullable(
            TypeToken::of::<T>(),
            value.map(|value| value as &dyn Any),
            writer,
            None,
            argument,
        )
    }

    fn read(
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Option<T>> {
        dispatcher
            .deserialize_nullable(TypeToken::of::<T>(), reader, None, argument)?
            .map(downcast_box::<T>)
            .transpose()
    }
}

impl<T: Binary> Serializer for NullableSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let value = downcast_ref::<Option<T>>(value)?;
        Self::write(writer, value.as_ref(), dispatcher, argument)
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        Ok(Box::new(Self::read(reader, dispatcher, argument)?))
    }
}

impl<T: Binary> Binary for Option<T> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(NullableSerializer::<T>::new()))
    }
}
