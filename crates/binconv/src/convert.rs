//! Entry points that turn values into buffers and back.
//!
//! Every operation exists twice: as a method on an explicit
//! [`SerializerRegistry`], and as a free function using
//! [`SerializerRegistry::global`]. `settings` may be `None` when no type
//! needs configuration.
//!
//! # Example
//!
//! ```ignore
//! let bytes = binconv::serialize(&vec![Some(1), None, Some(3)], None)?;
//! let value: Vec<Option<i32>> = binconv::deserialize(&bytes, None)?;
//! ```

use std::{
    any::Any,
    io::{Read, Write},
};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    registry::SerializerRegistry,
    serializer::downcast_box,
    settings::SerializerSettings,
    shape::{Binary, TypeToken},
};

impl SerializerRegistry {
    fn with_dispatcher<R>(
        &self,
        settings: Option<&SerializerSettings>,
        f: impl FnOnce(&Dispatcher<'_>) -> R,
    ) -> R {
        let empty = SerializerSettings::new();
        let settings = settings.unwrap_or(&empty);

        f(&Dispatcher::new(self, settings))
    }

    /// Serializes `value` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if a type reached while encoding has no serializer
    /// or a serializer rejects its value or argument.
    pub fn serialize<T: Binary>(
        &self,
        value: &T,
        settings: Option<&SerializerSettings>,
    ) -> Result<Vec<u8>> {
        self.serialize_dyn(TypeToken::of::<T>(), value, settings)
    }

    /// Serializes `value`, whose type is given by `token`, into a new
    /// buffer.
    ///
    /// # Errors
    ///
    /// Same as [`SerializerRegistry::serialize`], plus
    /// [`Error::TypeMismatch`] if `value` is not of the token's type.
    pub fn serialize_dyn(
        &self,
        token: TypeToken,
        value: &dyn Any,
        settings: Option<&SerializerSettings>,
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.serialize_into_dyn(&mut buffer, token, value, settings)?;

        Ok(buffer)
    }

    /// Serializes `value` into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`SerializerRegistry::serialize`], plus [`Error::Io`] if the
    /// writer fails.
    pub fn serialize_into<T: Binary>(
        &self,
        writer: &mut dyn Write,
        value: &T,
        settings: Option<&SerializerSettings>,
    ) -> Result<()> {
        self.serialize_into_dyn(writer, TypeToken::of::<T>(), value, settings)
    }

    fn serialize_into_dyn(
        &self,
        writer: &mut dyn Write,
        token: TypeToken,
        value: &dyn Any,
        settings: Option<&SerializerSettings>,
    ) -> Result<()> {
        let mut writer = BinaryWriter::new(writer);

        self.with_dispatcher(settings, |dispatcher| {
            dispatcher.serialize_object(token, value, &mut writer, None, None)
        })
    }

    /// Deserializes a `T` occupying all of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if `bytes` is not exactly one encoded
    /// `T`, and the resolution errors of [`SerializerRegistry::serialize`].
    pub fn deserialize<T: Binary>(
        &self,
        bytes: &[u8],
        settings: Option<&SerializerSettings>,
    ) -> Result<T> {
        downcast_box(self.deserialize_dyn(
            TypeToken::of::<T>(),
            bytes,
            settings,
        )?)
    }

    /// Deserializes a value of the token's type occupying all of `bytes`.
    ///
    /// # Errors
    ///
    /// Same as [`SerializerRegistry::deserialize`].
    pub fn deserialize_dyn(
        &self,
        token: TypeToken,
        bytes: &[u8],
        settings: Option<&SerializerSettings>,
    ) -> Result<Box<dyn Any>> {
        let mut input = bytes;
        let value = self.deserialize_from_dyn(&mut input, token, settings)?;

        if !input.is_empty() {
            return Err(Error::malformed(format!(
                "{} trailing bytes after `{}`",
                input.len(),
                token.name()
            )));
        }

        Ok(value)
    }

    /// Deserializes one `T` from `reader`, leaving whatever follows it
    /// unread.
    ///
    /// # Errors
    ///
    /// Same as [`SerializerRegistry::deserialize`], plus [`Error::Io`] if
    /// the reader fails.
    pub fn deserialize_from<T: Binary>(
        &self,
        reader: &mut dyn Read,
        settings: Option<&SerializerSettings>,
    ) -> Result<T> {
        downcast_box(self.deserialize_from_dyn(
            reader,
            TypeToken::of::<T>(),
            settings,
        )?)
    }

    fn deserialize_from_dyn(
        &self,
        reader: &mut dyn Read,
        token: TypeToken,
        settings: Option<&SerializerSettings>,
    ) -> Result<Box<dyn Any>> {
        let mut reader = BinaryReader::new(reader);

        self.with_dispatcher(settings, |dispatcher| {
            dispatcher.deserialize_object(token, &mut reader, None, None)
        })
    }
}

/// Serializes `value` with the global registry.
///
/// # Errors
///
/// See [`SerializerRegistry::serialize`].
pub fn serialize<T: Binary>(
    value: &T,
    settings: Option<&SerializerSettings>,
) -> Result<Vec<u8>> {
    SerializerRegistry::global().serialize(value, settings)
}

/// Serializes `value`, whose type is given by `token`, with the global
/// registry.
///
/// # Errors
///
/// See [`SerializerRegistry::serialize_dyn`].
pub fn serialize_dyn(
    token: TypeToken,
    value: &dyn Any,
    settings: Option<&SerializerSettings>,
) -> Result<Vec<u8>> {
    SerializerRegistry::global().serialize_dyn(token, value, settings)
}

/// Serializes `value` into `writer` with the global registry.
///
/// # Errors
///
/// See [`SerializerRegistry::serialize_into`].
pub fn serialize_into<T: Binary>(
    writer: &mut dyn Write,
    value: &T,
    settings: Option<&SerializerSettings>,
) -> Result<()> {
    SerializerRegistry::global().serialize_into(writer, value, settings)
}

/// Deserializes a `T` occupying all of `bytes` with the global registry.
///
/// # Errors
///
/// See [`SerializerRegistry::deserialize`].
pub fn deserialize<T: Binary>(
    bytes: &[u8],
    settings: Option<&SerializerSettings>,
) -> Result<T> {
    SerializerRegistry::global().deserialize(bytes, settings)
}

/// Deserializes a value of the token's type with the global registry.
///
/// # Errors
///
/// See [`SerializerRegistry::deserialize_dyn`].
pub fn deserialize_dyn(
    token: TypeToken,
    bytes: &[u8],
    settings: Option<&SerializerSettings>,
) -> Result<Box<dyn Any>> {
    SerializerRegistry::global().deserialize_dyn(token, bytes, settings)
}

/// Deserializes one `T` from `reader` with the global registry.
///
/// # Errors
///
/// See [`SerializerRegistry::deserialize_from`].
pub fn deserialize_from<T: Binary>(
    reader: &mut dyn Read,
    settings: Option<&SerializerSettings>,
) -> Result<T> {
    SerializerRegistry::global().deserialize_from(reader, settings)
}
