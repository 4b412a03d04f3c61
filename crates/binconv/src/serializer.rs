//! The object-safe [`Serializer`] contract.

use std::any::{Any, type_name, type_name_of_val};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    settings::SerializerArg,
};

/// Encodes and decodes values of one type.
///
/// A serializer owns the on-wire layout of its shape. It receives values as
/// `&dyn Any` and returns them as `Box<dyn Any>`; the concrete type is the
/// one it was resolved for. Nested values are never encoded directly but
/// handed back to the [`Dispatcher`], which resolves their serializers and
/// configuration.
///
/// # Null handling
///
/// By default a serializer takes part in the *common null envelope*: when a
/// nullable value is written, a presence byte precedes the payload and the
/// serializer is only invoked for present values. Serializers that encode
/// absence themselves (strings, containers, byte blocks use the `-1` length
/// prefix) return `false` from [`common_null_handle`] and override
/// [`serialize_nullable`] and [`deserialize_nullable`].
///
/// A serializer that returns `false` but keeps the provided methods gets no
/// envelope at all: present values are written as they are and an absent
/// value is rejected with [`Error::NullUnsupported`].
///
/// [`common_null_handle`]: Serializer::common_null_handle
/// [`serialize_nullable`]: Serializer::serialize_nullable
/// [`deserialize_nullable`]: Serializer::deserialize_nullable
pub trait Serializer: Send + Sync + 'static {
    /// Returns `true` if null values of this type are marked by the common
    /// presence byte, `false` if the serializer marks them itself.
    fn common_null_handle(&self) -> bool { true }

    /// Writes a present value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `value` is not of the handled type,
    /// and propagates codec and nested serializer failures.
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()>;

    /// Reads a present value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the input is not a valid encoding,
    /// and propagates nested serializer failures.
    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>>;

    /// Writes a value that may be absent.
    ///
    /// # Errors
    ///
    /// Same as [`Serializer::serialize`]. Returns [`Error::NullUnsupported`]
    /// for an absent value if the serializer opts out of the common null
    /// envelope without overriding this method.
    fn serialize_nullable(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: Option<&dyn Any>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        if self.common_null_handle() {
            writer.write_bool(value.is_some())?;
        }

        match value {
            Some(value) => self.serialize(writer, value, dispatcher, argument),
            None if self.common_null_handle() => Ok(()),
            None => Err(Error::NullUnsupported {
                serializer: type_name_of_val(self),
            }),
        }
    }

    /// Reads a value that may be absent.
    ///
    /// # Errors
    ///
    /// Same as [`Serializer::deserialize`].
    fn deserialize_nullable(
        &self,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Option<Box<dyn Any>>> {
        if !self.common_null_handle() || reader.read_bool()? {
            self.deserialize(reader, dispatcher, argument).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Downcasts a value handed to a serializer.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is not a `T`.
pub fn downcast_ref<T: Any>(value: &dyn Any) -> Result<&T> {
    value
        .downcast_ref()
        .ok_or(Error::TypeMismatch { expected: type_name::<T>() })
}

/// Unboxes a value produced by a serializer.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is not a `T`.
pub fn downcast_box<T: Any>(value: Box<dyn Any>) -> Result<T> {
    value
        .downcast()
        .map(|value| *value)
        .map_err(|_| Error::TypeMismatch { expected: type_name::<T>() })
}

/// Reports a null length prefix where the declared type cannot be absent.
pub(crate) fn unexpected_null<T: ?Sized>() -> Error {
    Error::malformed(format!(
        "found a null marker for non-nullable type `{}`",
        type_name::<T>()
    ))
}
