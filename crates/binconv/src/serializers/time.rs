//! Instants and durations as quantized tick counts.
//!
//! One tick is 100 nanoseconds. Instants count ticks since
//! `0001-01-01T00:00:00`; durations are a signed tick count. Before being
//! written, the tick count is divided (truncating toward zero) by the
//! resolution configured with [`DateTimeArg`], and multiplied back on
//! decode. The default resolution of one tick is lossless down to 100
//! nanoseconds.
//!
//! # Example
//!
//! ```ignore
//! use binconv::{SerializerSettings, serializers::time::DateTimeArg};
//! use chrono::NaiveDateTime;
//!
//! // whole seconds are enough for this timestamp
//! let settings = SerializerSettings::new()
//!     .with_argument::<NaiveDateTime>(DateTimeArg::SECONDS);
//! ```

use std::{
    any::{Any, type_name},
    marker::PhantomData,
    sync::Arc,
};

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    Timelike, Utc,
};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::{Error, Result},
    serializer::{Serializer, downcast_ref},
    settings::SerializerArg,
    shape::Binary,
};

#[cfg(test)]
mod test;

/// Ticks in one second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks in one day.
pub const TICKS_PER_DAY: i64 = 86_400 * TICKS_PER_SECOND;

const NANOS_PER_TICK: i64 = 100;

/// The precision of an encoded instant or duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeArg {
    tick_resolution: i64,
}

impl DateTimeArg {
    /// Full precision, one tick.
    pub const TICKS: Self = Self::new(1);

    /// Millisecond precision.
    pub const MILLISECONDS: Self = Self::new(TICKS_PER_SECOND / 1_000);

    /// Second precision.
    pub const SECONDS: Self = Self::new(TICKS_PER_SECOND);

    /// Minute precision.
    pub const MINUTES: Self = Self::new(60 * TICKS_PER_SECOND);

    /// Day precision.
    pub const DAYS: Self = Self::new(TICKS_PER_DAY);

    /// Creates an argument quantizing to `tick_resolution` ticks. Must be
    /// positive to be usable.
    #[must_use]
    pub const fn new(tick_resolution: i64) -> Self { Self { tick_resolution } }

    /// Returns the resolution in ticks.
    #[must_use]
    pub const fn tick_resolution(&self) -> i64 { self.tick_resolution }
}

impl Default for DateTimeArg {
    fn default() -> Self { Self::TICKS }
}

impl SerializerArg for DateTimeArg {}

/// A value that converts to and from a tick count.
pub trait Ticks: Any + Sized {
    /// Returns the value as ticks, or `None` if it does not fit in `i64` or
    /// has no tick equivalent, such as a leap second.
    fn to_ticks(&self) -> Option<i64>;

    /// Builds a value from ticks, or `None` if they are out of its range.
    fn from_ticks(ticks: i64) -> Option<Self>;
}

impl Ticks for NaiveDateTime {
    fn to_ticks(&self) -> Option<i64> {
        // chrono marks a leap second with a nanosecond field past one second
        if self.time().nanosecond() >= 1_000_000_000 {
            return None;
        }

        let days = i64::from(self.date().num_days_from_ce()) - 1;
        let seconds = i64::from(self.time().num_seconds_from_midnight());
        let ticks = i64::from(self.time().nanosecond()) / NANOS_PER_TICK;

        days.checked_mul(TICKS_PER_DAY)?
            .checked_add(seconds * TICKS_PER_SECOND)?
            .checked_add(ticks)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_ticks(ticks: i64) -> Option<Self> {
        let days = i32::try_from(ticks.div_euclid(TICKS_PER_DAY)).ok()?;
        let within_day = ticks.rem_euclid(TICKS_PER_DAY);

        let date = NaiveDate::from_num_days_from_ce_opt(days.checked_add(1)?)?;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(
            (within_day / TICKS_PER_SECOND) as u32,
            ((within_day % TICKS_PER_SECOND) * NANOS_PER_TICK) as u32,
        )?;

        Some(date.and_time(time))
    }
}

impl Ticks for DateTime<Utc> {
    fn to_ticks(&self) -> Option<i64> { self.naive_utc().to_ticks() }

    fn from_ticks(ticks: i64) -> Option<Self> {
        NaiveDateTime::from_ticks(ticks)
            .map(|naive| Self::from_naive_utc_and_offset(naive, Utc))
    }
}

impl Ticks for TimeDelta {
    fn to_ticks(&self) -> Option<i64> {
        self.num_seconds()
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(i64::from(self.subsec_nanos()) / NANOS_PER_TICK)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_ticks(ticks: i64) -> Option<Self> {
        Self::new(
            ticks.div_euclid(TICKS_PER_SECOND),
            (ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK) as u32,
        )
    }
}

/// Serializes a [`Ticks`] type as a signed varint of
/// `ticks / tick_resolution`.
///
/// Takes part in the common null envelope, so `Option<NaiveDateTime>` costs
/// one byte more than the instant itself.
pub struct DateTimeSerializer<T>(PhantomData<fn() -> T>);

impl<T> DateTimeSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for DateTimeSerializer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Ticks> DateTimeSerializer<T> {
    fn resolution(argument: Option<&dyn SerializerArg>) -> Result<i64> {
        let Some(argument) = argument else {
            return Ok(DateTimeArg::TICKS.tick_resolution);
        };

        let Some(date_time_arg) = argument.downcast_ref::<DateTimeArg>() else {
            return Err(Error::InvalidArgument {
                type_name: type_name::<T>(),
                reason: format!("expected a `DateTimeArg`, found {argument:?}"),
            });
        };

        if date_time_arg.tick_resolution <= 0 {
            return Err(Error::InvalidArgument {
                type_name: type_name::<T>(),
                reason: format!(
                    "tick resolution must be positive, found {}",
                    date_time_arg.tick_resolution
                ),
            });
        }

        Ok(date_time_arg.tick_resolution)
    }
}

impl<T: Ticks> Serializer for DateTimeSerializer<T> {
    fn serialize(
        &self,
        writer: &mut BinaryWriter<'_>,
        value: &dyn Any,
        _: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<()> {
        let resolution = Self::resolution(argument)?;
        let ticks = downcast_ref::<T>(value)?.to_ticks().ok_or_else(|| {
            Error::OutOfRange {
                type_name: type_name::<T>(),
                reason: "not representable as a tick count".to_owned(),
            }
        })?;

        writer.write_varint_i64(ticks / resolution)
    }

    fn deserialize(
        &self,
        reader: &mut BinaryReader<'_>,
        _: &Dispatcher<'_>,
        argument: Option<&dyn SerializerArg>,
    ) -> Result<Box<dyn Any>> {
        let resolution = Self::resolution(argument)?;
        let quotient = reader.read_varint_i64()?;

        let value = quotient
            .checked_mul(resolution)
            .and_then(T::from_ticks)
            .ok_or_else(|| {
                Error::malformed(format!(
                    "{quotient} x {resolution} ticks is out of range for `{}`",
                    type_name::<T>()
                ))
            })?;

        Ok(Box::new(value))
    }
}

macro_rules! impl_binary {
    ($($ty:ty),*) => {
        $(
            impl Binary for $ty {
                fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
                    Some(Arc::new(DateTimeSerializer::<Self>::new()))
                }
            }
        )*
    };
}

impl_binary!(NaiveDateTime, DateTime<Utc>, TimeDelta);
