//! UTF-8 strings as length-prefixed byte blocks.

use std::{any::Any, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    serializer::{Serializer, downcast_ref, unexpected_null},
    settings::SerializerArg,
    shape::Binary,
};

/// Serializes [`String`] as its UTF-8 bytes behind a length prefix. A `None`
/// string is the `-1` prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringSerializer;

impl StringSerializer {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Option<String>> {
        reader
            .read_block()?
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|error| {
                    Error::malformed(format!("invalid UTF-8 string: {error}"))
                })
            })
            .transpose()
    }
}

impl Serializer for StringSerializer {
    fn common_null_handle(&self) -> bool { false }

    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_block(Some(downcast_ref::<String>(value)?.as_bytes()))
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        match Self::read(reader)? {
            Some(string) => Ok(Box::new(string)),
            None => Err(unexpected_null::<String>()),
        }
    }

    fn serialize_nullable(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: Option<&dyn Any>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let string = value.map(downcast_ref::<String>).transpose()?;
        writer.write_block(string.map(String::as_bytes))
    }

    fn deserialize_nullable(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        Ok(Self::read(reader)?.map(|string| Box::new(string) as Box<dyn Any>))
    }
}

impl Binary for String {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(StringSerializer))
    }
}
