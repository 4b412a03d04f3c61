//! Tuples of arity 1 through 12: each field in order, with no prefix.
//!
//! Wider tuples nest, putting a tuple in the last field.

use std::{any::Any, marker::PhantomData, sync::Arc};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    dispatch::Dispatcher,
    error::Result,
    serializer::{Serializer, downcast_box, downcast_ref},
    settings::SerializerArg,
    shape::{Binary, TypeToken},
};

/// Serializes the tuple type `T` field by field.
pub struct TupleSerializer<T>(PhantomData<fn() -> T>);

impl<T> TupleSerializer<T> {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for TupleSerializer<T> {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Binary),+> Serializer for TupleSerializer<($($name,)+)> {
            #[allow(non_snake_case)]
            fn serialize(
                &self,
                writer: &mut BinaryWriter<'_>,
                value: &dyn Any,
                dispatcher: &Dispatcher<'_>,
                _: Option<&dyn SerializerArg>,
            ) -> Result<()> {
                let ($($name,)+) = downcast_ref::<($($name,)+)>(value)?;
                $(
                    dispatcher.serialize_object(
                        TypeToken::of::<$name>(),
                        $name,
                        writer,
                        None,
                        None,
                    )?;
                )+
                Ok(())
            }

            fn deserialize(
                &self,
                reader: &mut BinaryReader<'_>,
                dispatcher: &Dispatcher<'_>,
                _: Option<&dyn SerializerArg>,
            ) -> Result<Box<dyn Any>> {
                let value: ($($name,)+) = ($(
                    downcast_box::<$name>(dispatcher.deserialize_object(
                        TypeToken::of::<$name>(),
                        reader,
                        None,
                        None,
                    )?)?,
                )+);
                Ok(Box::new(value))
            }
        }

        impl<$($name: Binary),+> Binary for ($($name,)+) {
            fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
                Some(Arc::new(TupleSerializer::<Self>::new()))
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
impl_tuple!(A, B, C, D, E, F, G);
impl_tuple!(A, B, C, D, E, F, G, H);
impl_tuple!(A, B, C, D, E, F, G, H, I);
impl_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);
