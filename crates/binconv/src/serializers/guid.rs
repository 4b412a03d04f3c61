//! [`Uuid`] as a 16-byte block.

use std::{any::Any, sync::Arc};

use uuid::Uuid;

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    serializer::{Serializer, downcast_ref},
    settings::SerializerArg,
    shape::Binary,
};

/// Serializes [`Uuid`] as a length-prefixed block of its 16 bytes in RFC 4122
/// order, 17 bytes in total.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidSerializer;

impl Serializer for GuidSerializer {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let uuid = downcast_ref::<Uuid>(value)?;
        writer.write_block(Some(uuid.as_bytes().as_slice()))
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let bytes = reader
            .read_block()?
            .ok_or_else(|| Error::malformed("null block for a guid"))?;

        let uuid = Uuid::from_slice(&bytes).map_err(|_| {
            Error::malformed(format!(
                "guid block must be 16 bytes, found {}",
                bytes.len()
            ))
        })?;

        Ok(Box::new(uuid))
    }
}

impl Binary for Uuid {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(GuidSerializer))
    }
}
