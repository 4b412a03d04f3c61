//! `Vec<T>` and `VecDeque<T>`, plus the raw byte block used for `Vec<u8>`.

use std::{
    any::{Any, TypeId},
    collections::VecDeque,
    sync::Arc,
};

use crate::{
    codec::{BinaryReader, BinaryWriter, preallocation},
    dispatch::Dispatcher,
    error::Result,
    serializer::{Serializer, downcast_ref, unexpected_null},
    serializers::container::{Container, ContainerSerializer, Element},
    settings::SerializerArg,
    shape::Binary,
};

impl<T: Binary> Container for Vec<T> {
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let element = Element::<T>::resolve(dispatcher)?;

        for item in self {
            element.write(writer, item, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let element = Element::<T>::resolve(dispatcher)?;
        let mut items = Self::with_capacity(preallocation(count));

        for _ in 0..count {
            items.push(element.read(reader, dispatcher)?);
        }

        Ok(items)
    }
}

impl<T: Binary> Binary for Vec<T> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        if TypeId::of::<T>() == TypeId::of::<u8>() {
            Some(Arc::new(ByteBlockSerializer))
        } else {
            Some(Arc::new(ContainerSerializer::<Self>::new()))
        }
    }
}

impl<T: Binary> Container for VecDeque<T> {
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let element = Element::<T>::resolve(dispatcher)?;

        for item in self {
            element.write(writer, item, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let element = Element::<T>::resolve(dispatcher)?;
        let mut items = Self::with_capacity(preallocation(count));

        for _ in 0..count {
            items.push_back(element.read(reader, dispatcher)?);
        }

        Ok(items)
    }
}

impl<T: Binary> Binary for VecDeque<T> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(ContainerSerializer::<Self>::new()))
    }
}

/// Serializes `Vec<u8>` as a length-prefixed block of raw bytes.
///
/// The layout is the same as an array of bytes would have for values below
/// `0x80`, but every byte is copied verbatim instead of being varint-coded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteBlockSerializer;

impl Serializer for ByteBlockSerializer {
    fn common_null_handle(&self) -> bool { false }

    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_block(Some(downcast_ref::<Vec<u8>>(value)?.as_slice()))
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        match reader.read_block()? {
            Some(bytes) => Ok(Box::new(bytes)),
            None => Err(unexpected_null::<Vec<u8>>()),
        }
    }

    fn serialize_nullable(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: Option<&dyn Any>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let bytes = value.map(downcast_ref::<Vec<u8>>).transpose()?;
        writer.write_block(bytes.map(Vec::as_slice))
    }

    fn deserialize_nullable(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        Ok(reader.read_block()?.map(|bytes| Box::new(bytes) as Box<dyn Any>))
    }
}
