//! Sets: a count followed by the elements in iteration order.
//!
//! Decoding starts from an empty set of the declared type and inserts in
//! read order, so the set's own duplicate elimination applies.

use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use crate::{
    codec::{BinaryReader, BinaryWriter, preallocation},
    dispatch::Dispatcher,
    error::Result,
    serializer::Serializer,
    serializers::container::{Container, ContainerSerializer, Element},
    shape::Binary,
};

impl<T, S> Container for HashSet<T, S>
where
    T: Binary + Eq + Hash,
    S: BuildHasher + Default + 'static,
{
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let element = Element::<T>::resolve(dispatcher)?;

        for item in self {
            element.write(writer, item, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let element = Element::<T>::resolve(dispatcher)?;
        let mut set =
            Self::with_capacity_and_hasher(preallocation(count), S::default());

        for _ in 0..count {
            set.insert(element.read(reader, dispatcher)?);
        }

        Ok(set)
    }
}

impl<T, S> Binary for HashSet<T, S>
where
    T: Binary + Eq + Hash,
    S: BuildHasher + Default + 'static,
{
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(ContainerSerializer::<Self>::new()))
    }
}

impl<T: Binary + Ord> Container for BTreeSet<T> {
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let element = Element::<T>::resolve(dispatcher)?;

        for item in self {
            element.write(writer, item, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let element = Element::<T>::resolve(dispatcher)?;
        let mut set = Self::new();

        for _ in 0..count {
            set.insert(element.read(reader, dispatcher)?);
        }

        Ok(set)
    }
}

impl<T: Binary + Ord> Binary for BTreeSet<T> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(ContainerSerializer::<Self>::new()))
    }
}
