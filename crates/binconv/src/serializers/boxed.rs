//! `Box<T>`, encoded exactly like `T`.
//!
//! Boxing makes recursive records expressible (`Option<Box<Node>>`); it has
//! no representation of its own on the wire.

use std::{any::Any, marker::PhantomData, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::Result,
    serializer::{Serializer, downcast_box, downcast_ref},
    settings::SerializerArg,
    shape::{Binary, TypeToken},
};

/// Serializes `Box<T>` exactly like `T`.
pub struct BoxedSerializer<T>(PhantomData<fn() -> T>);

impl<T> BoxedSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for BoxedSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Binary> Serializer for BoxedSerializer<T> {
    fn common_null_handle(&self) -> bool { false }

    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let value: &T = downcast_ref::<Box<T>>(value)?;
        dispatcher.serialize_object(
            TypeToken::of::<T>(),
            value,
            writer,
            None,
            argument,
        )
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let value = dispatcher.deserialize_object(
            TypeToken::of::<T>(),
            reader,
            None,
            argument,
        )?;

        Ok(Box::new(downcast_box::<T>(value).map(Box::new)?))
    }

    fn serialize_nullable(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: Option<&dyn Any>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let value = value
            .map(|value| {
                downcast_ref::<Box<T>>(value).map(|value| &**value as &dyn Any)
            })
            .transpose()?;

        dispatcher.serialize_nullable(
            TypeToken::of::<T>(),
            value,
            writer,
            None,
            argument,
        )
    }

    fn deserialize_nullable(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        dispatcher
            .deserialize_nullable(TypeToken::of::<T>(), reader, None, argument)?
            .map(|value| {
                downcast_box::<T>(value)
                    .map(|value| Box::new(Box::new(value)) as Box<dyn Any>)
            })
            .transpose()
    }
}

impl<T: Binary> Binary for Box<T> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(BoxedSerializer::<T>::new()))
    }
}
