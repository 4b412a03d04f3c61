//! Integer, boolean, character, floating-point and decimal serializers.
//!
//! Integers are written through a canonical 64-bit form:
//!
//! - the **signed family** (`bool`, `char`, `u8`, `i8` through `i64`,
//!   `isize`) as a signed varint,
//! - the **unsigned family** (`u16` through `u64`, `usize`) as an unsigned
//!   varint.
//!
//! A decoded value that does not fit the declared type is malformed input.

use std::{
    any::{Any, type_name},
    marker::PhantomData,
    sync::Arc,
};

use rust_decimal::Decimal;

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    serializer::{Serializer, downcast_ref},
    settings::SerializerArg,
    shape::Binary,
};

// =============================================================================
// Signed family
// =============================================================================

/// A type written as a signed varint.
pub trait SignedRepr: Any + Copy + Send + Sync {
    /// Widens the value to its canonical form.
    fn widen(self) -> i64;

    /// Narrows the canonical form back, or `None` if it does not fit.
    fn narrow(value: i64) -> Option<Self>;
}

macro_rules! impl_signed_repr {
    ($($ty:ty),*) => {
        $(
            impl SignedRepr for $ty {
                fn widen(self) -> i64 { i64::from(self) }

                fn narrow(value: i64) -> Option<Self> {
                    Self::try_from(value).ok()
                }
            }
        )*
    };
}

impl_signed_repr!(i8, i16, i32, i64, u8);

impl SignedRepr for isize {
    #[allow(clippy::cast_possible_truncation)]
    fn widen(self) -> i64 { self as i64 }

    fn narrow(value: i64) -> Option<Self> { Self::try_from(value).ok() }
}

impl SignedRepr for bool {
    fn widen(self) -> i64 { i64::from(self) }

    fn narrow(value: i64) -> Option<Self> {
        match value {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl SignedRepr for char {
    fn widen(self) -> i64 { i64::from(u32::from(self)) }

    fn narrow(value: i64) -> Option<Self> {
        u32::try_from(value).ok().and_then(Self::from_u32)
    }
}

/// Serializes the signed family as a signed varint.
pub struct SignedSerializer<T>(PhantomData<fn() -> T>);

impl<T> SignedSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for SignedSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: SignedRepr> Serializer for SignedSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_varint_i64(downcast_ref::<T>(value)?.widen())
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let value = reader.read_varint_i64()?;

        T::narrow(value)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .ok_or_else(|| out_of_range::<T>(value))
    }
}

// =============================================================================
// Unsigned family
// =============================================================================

/// A type written as an unsigned varint.
pub trait UnsignedRepr: Any + Copy + Send + Sync {
    /// Widens the value to its canonical form.
    fn widen(self) -> u64;

    /// Narrows the canonical form back, or `None` if it does not fit.
    fn narrow(value: u64) -> Option<Self>;
}

macro_rules! impl_unsigned_repr {
    ($($ty:ty),*) => {
        $(
            impl UnsignedRepr for $ty {
                fn widen(self) -> u64 { u64::from(self) }

                fn narrow(value: u64) -> Option<Self> {
                    Self::try_from(value).ok()
                }
            }
        )*
    };
}

impl_unsigned_repr!(u16, u32, u64);

impl UnsignedRepr for usize {
    fn widen(self) -> u64 { self as u64 }

    fn narrow(value: u64) -> Option<Self> { Self::try_from(value).ok() }
}

/// Serializes the unsigned family as an unsigned varint.
pub struct UnsignedSerializer<T>(PhantomData<fn() -> T>);

impl<T> UnsignedSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for UnsignedSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: UnsignedRepr> Serializer for UnsignedSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_varint_u64(downcast_ref::<T>(value)?.widen())
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let value = reader.read_varint_u64()?;

        T::narrow(value)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .ok_or_else(|| out_of_range::<T>(value))
    }
}

fn out_of_range<T>(value: impl std::fmt::Display) -> Error {
    Error::malformed(format!(
        "{value} is out of range for `{}`",
        type_name::<T>()
    ))
}

// =============================================================================
// Floating-point and decimal
// =============================================================================

/// Serializes `f32` as 4 little-endian bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct F32Serializer;

impl Serializer for F32Serializer {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_f32(*downcast_ref::<f32>(value)?)
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        Ok(Box::new(reader.read_f32()?))
    }
}

/// Serializes `f64` as 8 little-endian bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct F64Serializer;

impl Serializer for F64Serializer {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_f64(*downcast_ref::<f64>(value)?)
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        Ok(Box::new(reader.read_f64()?))
    }
}

/// Serializes [`Decimal`] as its fixed 16-byte layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecimalSerializer;

impl Serializer for DecimalSerializer {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        writer.write_fixed(&downcast_ref::<Decimal>(value)?.serialize())
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        _: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let bytes = reader.read_fixed::<16>()?;
        let flags = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

        if flags & DECIMAL_RESERVED_FLAGS != 0 {
            return Err(Error::malformed("decimal sets reserved flag bits"));
        }

        let scale = (flags >> 16) & 0xFF;
        if scale > DECIMAL_MAX_SCALE {
            return Err(Error::malformed(format!(
                "decimal scale {scale} exceeds {DECIMAL_MAX_SCALE}"
            )));
        }

        Ok(Box::new(Decimal::deserialize(bytes)))
    }
}

// everything but the sign bit and the scale byte
const DECIMAL_RESERVED_FLAGS: u32 = 0x7F00_FFFF;
const DECIMAL_MAX_SCALE: u32 = 28;

// =============================================================================
// Shapes
// =============================================================================

macro_rules! impl_binary {
    ($serializer:ident => $($ty:ty),*) => {
        $(
            impl Binary for $ty {
                fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
                    Some(Arc::new($serializer::<$ty>::new()))
                }
            }
        )*
    };
}

impl_binary!(SignedSerializer => bool, char, u8, i8, i16, i32, i64, isize);
impl_binary!(UnsignedSerializer => u16, u32, u64, usize);

impl Binary for f32 {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(F32Serializer))
    }
}

impl Binary for f64 {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(F64Serializer))
    }
}

impl Binary for Decimal {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(DecimalSerializer))
    }
}
