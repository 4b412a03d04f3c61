//! Maps: a count followed by alternating keys and values.
//!
//! Entries are written in the map's iteration order and inserted in read
//! order on decode, so a `HashMap` round-trips to an equal map but not
//! necessarily to the same byte sequence when re-encoded.

use std::{
    collections::{BTreeMap, HashMap},
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

impl<K, V, S> Container for HashMap<K, V, S>
where
    K: Binary + Eq + Hash,
    V: Binary,
    S: BuildHasher + Default + 'static,
{
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let key = Element::<K>::resolve(dispatcher)?;
        let value = Element::<V>::resolve(dispatcher)?;

        for (k, v) in self {
            key.write(writer, k, dispatcher)?;
            value.write(writer, v, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let key = Element::<K>::resolve(dispatcher)?;
        let value = Element::<V>::resolve(dispatcher)?;
        let mut map =
            Self::with_capacity_and_hasher(preallocation(count), S::default());

        for _ in 0..count {
            let k = key.read(reader, dispatcher)?;
            let v = value.read(reader, dispatcher)?;
            map.insert(k, v);
        }

        Ok(map)
    }
}

impl<K, V, S> Binary for HashMap<K, V, S>
where
    K: Binary + Eq + Hash,
    V: Binary,
    S: BuildHasher + Default + 'static,
{
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(ContainerSerializer::<Self>::new()))
    }
}

impl<K: Binary + Ord, V: Binary> Container for BTreeMap<K, V> {
    fn count(&self) -> usize { self.len() }

    fn write_entries(
        &self,
        writer: &mut BinaryWriter<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<()> {
        let key = Element::<K>::resolve(dispatcher)?;
        let value = Element::<V>::resolve(dispatcher)?;

        for (k, v) in self {
            key.write(writer, k, dispatcher)?;
            value.write(writer, v, dispatcher)?;
        }

        Ok(())
    }

    fn read_entries(
        count: usize,
        reader: &mut BinaryReader<'_>,
        dispatcher: &Dispatcher<'_>,
    ) -> Result<Self> {
        let key = Element::<K>::resolve(dispatcher)?;
        let value = Element::<V>::resolve(dispatcher)?;
        let mut map = Self::new();

        for _ in 0..count {
            let k = key.read(reader, dispatcher)?;
            let v = value.read(reader, dispatcher)?;
            map.insert(k, v);
        }

        Ok(map)
    }
}

impl<K: Binary + Ord, V: Binary> Binary for BTreeMap<K, V> {
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> {
        Some(Arc::new(ContainerSerializer::<Self>::new()))
    }
}
