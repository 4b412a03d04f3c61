//! Records, member by member.

use std::{
    any::{Any, type_name},
    marker::PhantomData,
};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    record::Record,
    serializer::{Serializer, downcast_ref},
    settings::SerializerArg,
};

/// Serializes a [`Record`] as its members in declaration order, with no
/// prefix.
///
/// Each member goes through the dispatcher with the overrides of its
/// [`MemberMap`](crate::MemberMap): ignored members are skipped entirely,
/// and a member serializer or argument replaces the one resolved from the
/// member's type. Decoding constructs a fresh instance first, so ignored
/// members keep their constructed value.
pub struct ClassSerializer<T>(PhantomData<fn() -> T>);

impl<T> ClassSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for ClassSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Record> Serializer for ClassSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        dispatcher: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let record = downcast_ref::<T>(value)?;
        let accessors = dispatcher.registry().accessors::<T>()?;
        let class_map = dispatcher.registry().class_map_of::<T>()?;

        for (member, map) in accessors.members().iter().zip(class_map.members())
        {
            if map.is_ignored() {
                tracing::trace!(member = member.name(), "skipping member");
                continue;
            }

            dispatcher.serialize_object(
                member.member_type(),
                member.get(record),
                writer,
                map.serializer(),
                map.argument(),
            )?;
        }

        Ok(())
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let accessors = dispatcher.registry().accessors::<T>()?;
        let class_map = dispatcher.registry().class_map_of::<T>()?;

        let mut record = accessors
            .construct()
            .ok_or(Error::Construction { type_name: type_name::<T>() })?;

        for (member, map) in accessors.members().iter().zip(class_map.members())
        {
            if map.is_ignored() {
                tracing::trace!(member = member.name(), "skipping member");
                continue;
            }

            let value = dispatcher.deserialize_object(
                member.member_type(),
                reader,
                map.serializer(),
                map.argument(),
            )?;
            member.set(&mut record, value)?;
        }

        Ok(Box::new(record))
    }
}
