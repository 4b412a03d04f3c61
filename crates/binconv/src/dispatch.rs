//! The recursive entry point every serializer calls back into.

use std::{any::Any, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    error::Result,
    registry::SerializerRegistry,
    serializer::{Serializer, downcast_box},
    settings::{SerializerArg, SerializerSettings},
    shape::{Binary, TypeToken},
};

/// Resolves serializers and configuration for nested values.
///
/// A dispatcher lives for one serialize or deserialize operation and carries
/// the registry and settings that operation uses. Serializers never encode a
/// nested value themselves: they call [`serialize_object`] or
/// [`deserialize_object`] with the nested value's [`TypeToken`], and the
/// dispatcher picks the serializer and argument for it.
///
/// # Resolution
///
/// - **Serializer**: an explicit override is used as-is, otherwise the
///   registry resolves one from the type.
/// - **Argument**: an explicit override wins, otherwise the settings entry
///   for the type, otherwise none.
///
/// [`serialize_object`]: Dispatcher::serialize_object
/// [`deserialize_object`]: Dispatcher::deserialize_object
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a SerializerRegistry,
    settings: &'a SerializerSettings,
}

/// The serializer chosen for one value: either borrowed from an override or
/// owned from the registry.
enum Resolved<'s> {
    Override(&'s dyn Serializer),
    Registry(Arc<dyn Serializer>),
}

impl std::ops::Deref for Resolved<'_> {
    type Target = dyn Serializer;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Override(serializer) => *serializer,
            Self::Registry(serializer) => serializer.as_ref(),
        }
    }
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the given registry and settings.
    #[must_use]
    pub const fn new(
        registry: &'a SerializerRegistry,
        settings: &'a SerializerSettings,
    ) -> Self {
        Self { registry, settings }
    }

    /// Returns the registry serializers are resolved from.
    #[must_use]
    pub const fn registry(&self) -> &'a SerializerRegistry { self.registry }

    /// Returns the settings of the current operation.
    #[must_use]
    pub const fn settings(&self) -> &'a SerializerSettings { self.settings }

    /// Resolves the serializer for the given type through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`](crate::Error::UnsupportedType) if
    /// no serializer is available.
    pub fn resolve(&self, token: TypeToken) -> Result<Arc<dyn Serializer>> {
        self.registry.get_serializer(token)
    }

    /// Returns the argument the settings configure for the given type.
    #[must_use]
    pub fn argument_for(
        &self,
        token: TypeToken,
    ) -> Option<&'a dyn SerializerArg> {
        self.settings.argument_for(token.id())
    }

    fn pick<'s>(
        &self,
        token: TypeToken,
        serializer: Option<&'s dyn Serializer>,
    ) -> Result<Resolved<'s>> {
        match serializer {
            Some(serializer) => Ok(Resolved::Override(serializer)),
            None => self.resolve(token).map(Resolved::Registry),
        }
    }

    /// Serializes a present value of the given type.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures.
    pub fn serialize_object(
        &self,
        token: TypeToken,
        value: &dyn Any,
        writer: &mut BinaryWriter<'_>,
        serializer: Option<&dyn Serializer>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let resolved = self.pick(token, serializer)?;
        let argument = argument.or_else(|| self.argument_for(token));

        resolved.serialize(writer, value, self, argument)
    }

    /// Deserializes a present value of the given type.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures.
    pub fn deserialize_object(
        &self,
        token: TypeToken,
        reader: &mut BinaryReader<'_>,
        serializer: Option<&dyn Serializer>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let resolved = self.pick(token, serializer)?;
        let argument = argument.or_else(|| self.argument_for(token));

        resolved.deserialize(reader, self, argument)
    }

    /// Serializes a value of the given type that may be absent.
    ///
    /// Exactly one null marker is written: the common presence byte, or the
    /// serializer's own sentinel if it manages null itself.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures.
    pub fn serialize_nullable(
        &self,
        token: TypeToken,
        value: Option<&dyn Any>,
        writer: &mut BinaryWriter<'_>,
        serializer: Option<&dyn Serializer>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let resolved = self.pick(token, serializer)?;
        let argument = argument.or_else(|| self.argument_for(token));

        resolved.serialize_nullable(writer, value, self, argument)
    }

    /// Deserializes a value of the given type that may be absent.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures.
    pub fn deserialize_nullable(
        &self,
        token: TypeToken,
        reader: &mut BinaryReader<'_>,
        serializer: Option<&dyn Serializer>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        let resolved = self.pick(token, serializer)?;
        let argument = argument.or_else(|| self.argument_for(token));

        resolved.deserialize_nullable(reader, self, argument)
    }

    /// Serializes a value of a statically known type.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures.
    pub fn serialize<T: Binary>(
        &self,
        value: &T,
        writer: &mut BinaryWriter<'_>,
    ) -> Result<()> {
        self.serialize_object(TypeToken::of::<T>(), value, writer, None, None)
    }

    /// Deserializes a value of a statically known type.
    ///
    /// # Errors
    ///
    /// Propagates resolution, codec and serializer failures, and returns
    /// [`Error::TypeMismatch`](crate::Error::TypeMismatch) if the resolved
    /// serializer produced a value of another type.
    pub fn deserialize<T: Binary>(
        &self,
        reader: &mut BinaryReader<'_>,
    ) -> Result<T> {
        downcast_box(self.deserialize_object(
            TypeToken::of::<T>(),
            reader,
            None,
            None,
        )?)
    }
}
