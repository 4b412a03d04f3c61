//! The wire-level reader and writer.
//!
//! [`BinaryWriter`] and [`BinaryReader`] wrap any [`Write`] or [`Read`]
//! implementation and provide the handful of primitive encodings every
//! serializer is built from.
//!
//! # Format Overview
//!
//! - **Booleans and bytes**: a single byte. Booleans must decode as `0` or
//!   `1`.
//! - **Unsigned varints**: LEB128, seven bits per byte, least significant
//!   group first, high bit set on every byte but the last.
//! - **Signed varints**: the two's-complement bit pattern of the `i64` is
//!   written as an unsigned varint. There is no zigzag step, so small
//!   non-negative values are compact and every negative value takes ten
//!   bytes.
//! - **Floating-point**: `f32` and `f64` as little-endian IEEE 754.
//! - **Length prefixes**: a signed varint where `-1` marks an absent value
//!   and any other negative number is malformed.
//! - **Byte blocks**: a length prefix followed by the raw bytes.
//!
//! # Example
//!
//! ```ignore
//! use binconv::codec::{BinaryReader, BinaryWriter};
//!
//! let mut buffer = Vec::new();
//! BinaryWriter::new(&mut buffer).write_varint_u64(300).unwrap();
//! assert_eq!(buffer, [0xAC, 0x02]);
//!
//! let mut input = &buffer[..];
//! let value = BinaryReader::new(&mut input).read_varint_u64().unwrap();
//! assert_eq!(value, 300);
//! ```

use std::io::{Read, Write};

use crate::error::{Error, Result};

#[cfg(test)]
mod test;

// =============================================================================
// Varint helper functions
// =============================================================================

/// Maximum number of bytes a 64-bit varint can occupy.
pub const MAX_VARINT_BYTES: usize = 10;

/// The length prefix that marks an absent container, string or block.
pub const NULL_LENGTH: i64 = -1;

/// Upper bound on elements reserved ahead of decoding a container; a forged
/// count can't allocate more than this before the input runs out.
pub const MAX_PREALLOCATION: usize = 4096;

/// Encodes an unsigned 64-bit integer as a varint into the buffer.
/// Returns the number of bytes written.
#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn encode_varint_u64(
    mut value: u64,
    buf: &mut [u8; MAX_VARINT_BYTES],
) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Returns the number of elements to reserve for a declared `count`.
#[inline]
#[must_use]
pub fn preallocation(count: usize) -> usize { count.min(MAX_PREALLOCATION) }

// =============================================================================
// BinaryWriter
// =============================================================================

/// Writes the primitive encodings to an underlying [`Write`].
pub struct BinaryWriter<'w> {
    writer: &'w mut dyn Write,
}

impl<'w> BinaryWriter<'w> {
    /// Creates a new writer over the given sink.
    pub fn new(writer: &'w mut dyn Write) -> Self { Self { writer } }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value])?;
        Ok(())
    }

    /// Writes a boolean as `0` or `1`.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes an unsigned LEB128 varint.
    pub fn write_varint_u64(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let len = encode_varint_u64(value, &mut buf);
        self.writer.write_all(&buf[..len])?;
        Ok(())
    }

    /// Writes a signed varint: the two's-complement bits of `value` encoded
    /// as an unsigned varint.
    #[allow(clippy::cast_sign_loss)]
    pub fn write_varint_i64(&mut self, value: i64) -> Result<()> {
        self.write_varint_u64(value as u64)
    }

    /// Writes a little-endian `f32`.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_fixed(&value.to_le_bytes())
    }

    /// Writes a little-endian `f64`.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_fixed(&value.to_le_bytes())
    }

    /// Writes raw bytes with no prefix.
    pub fn write_fixed(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Writes a length prefix, using [`NULL_LENGTH`] for `None`.
    pub fn write_length(&mut self, length: Option<usize>) -> Result<()> {
        let Some(length) = length else {
            return self.write_varint_i64(NULL_LENGTH);
        };

        let length = i64::try_from(length).map_err(|_| {
            Error::malformed(format!("length {length} does not fit in i64"))
        })?;
        self.write_varint_i64(length)
    }

    /// Writes a length-prefixed byte block, or the null prefix for `None`.
    pub fn write_block(&mut self, block: Option<&[u8]>) -> Result<()> {
        self.write_length(block.map(<[u8]>::len))?;
        if let Some(block) = block {
            self.write_fixed(block)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BinaryWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryWriter").finish_non_exhaustive()
    }
}

// =============================================================================
// BinaryReader
// =============================================================================

/// Reads the primitive encodings from an underlying [`Read`].
pub struct BinaryReader<'r> {
    reader: &'r mut dyn Read,
}

impl<'r> BinaryReader<'r> {
    /// Creates a new reader over the given source.
    pub fn new(reader: &'r mut dyn Read) -> Self { Self { reader } }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads a boolean, rejecting any byte other than `0` or `1`.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::malformed(format!(
                "invalid boolean value: {other}"
            ))),
        }
    }

    /// Reads an unsigned LEB128 varint of at most [`MAX_VARINT_BYTES`].
    pub fn read_varint_u64(&mut self) -> Result<u64> {
        let mut result: u64 = 0;
        let mut shift = 0;

        loop {
            let byte = self.read_u8()?;

            // the tenth byte only has room for the most significant bit
            if shift >= 64 || (shift == 63 && byte & 0x7F > 1) {
                return Err(Error::malformed("varint too long for u64"));
            }

            result |= u64::from(byte & 0x7F) << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }

            shift += 7;
        }
    }

    /// Reads a signed varint written by
    /// [`BinaryWriter::write_varint_i64`].
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_varint_i64(&mut self) -> Result<i64> {
        Ok(self.read_varint_u64()? as i64)
    }

    /// Reads a little-endian `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_fixed()?))
    }

    /// Reads a little-endian `f64`.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_fixed()?))
    }

    /// Reads exactly `N` raw bytes.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads a length prefix. Returns `None` for the null prefix.
    pub fn read_length(&mut self) -> Result<Option<usize>> {
        let length = self.read_varint_i64()?;

        if length == NULL_LENGTH {
            return Ok(None);
        }

        usize::try_from(length).map(Some).map_err(|_| {
            Error::malformed(format!("invalid length prefix: {length}"))
        })
    }

    /// Reads a length-prefixed byte block. Returns `None` for the null
    /// prefix.
    pub fn read_block(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(length) = self.read_length()? else {
            return Ok(None);
        };

        let mut buf = Vec::with_capacity(preallocation(length));
        Read::take(&mut *self.reader, length as u64).read_to_end(&mut buf)?;

        if buf.len() != length {
            return Err(Error::malformed(format!(
                "byte block declares {length} bytes but only {} remain",
                buf.len()
            )));
        }

        Ok(Some(buf))
    }
}

impl std::fmt::Debug for BinaryReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryReader").finish_non_exhaustive()
    }
}
