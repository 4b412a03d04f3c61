//! The concurrent serializer registry.
//!
//! [`SerializerRegistry`] maps a runtime type identity to the serializer used
//! for it, to the [`ClassMap`] of a record type, and to the cached accessor
//! table of a record type. All tables are sharded concurrent maps: lookups
//! never block each other and registration only locks one shard for the
//! duration of a single insert, so registration may happen while other
//! threads serialize.
//!
//! Entries are only ever added or replaced; [`unregister_class_map`] is the
//! only explicit removal.
//!
//! [`unregister_class_map`]: SerializerRegistry::unregister_class_map

use std::{
    any::{Any, TypeId, type_name},
    sync::{Arc, OnceLock},
};

use dashmap::DashMap;
use fxhash::FxBuildHasher;

use crate::{
    class_map::ClassMap,
    error::{Error, Result},
    record::{ClassAccessors, Record},
    serializer::Serializer,
    shape::{Binary, TypeToken},
};


type TypeMap<V> = DashMap<TypeId, V, FxBuildHasher>;

/// Resolves and caches serializers, class maps and accessor tables.
///
/// Most programs use the process-wide instance returned by
/// [`SerializerRegistry::global`], which backs the free functions of this
/// crate. Independent instances are useful to keep class-map registrations
/// apart, for example in tests.
///
/// # Example
///
/// ```ignore
/// use binconv::SerializerRegistry;
///
/// let registry = SerializerRegistry::new();
/// registry.register_class_map::<Person>(|map| {
///     map.map_member("cache")?.ignore();
///     Ok(())
/// })?;
///
/// let bytes = registry.serialize(&person, None)?;
/// ```
#[derive(Default)]
pub struct SerializerRegistry {
    resolved: TypeMap<Arc<dyn Serializer>>,
    registered: TypeMap<Arc<dyn Serializer>>,
    class_maps: TypeMap<Arc<ClassMap>>,
    accessors: TypeMap<Arc<dyn Any + Send + Sync>>,
}

impl SerializerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolved: DashMap::default(),
            registered: DashMap::default(),
            class_maps: DashMap::default(),
            accessors: DashMap::default(),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<SerializerRegistry> = OnceLock::new();

        GLOBAL.get_or_init(Self::new)
    }

    // =========================================================================
    // Serializers
    // =========================================================================

    /// Returns the serializer for the given type.
    ///
    /// The type's intrinsic shape is consulted first, then the serializer
    /// registered for that exact type. The result is cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if the type has no intrinsic shape
    /// and nothing is registered for it.
    pub fn get_serializer(
        &self,
        token: TypeToken,
    ) -> Result<Arc<dyn Serializer>> {
        if let Some(serializer) = self.resolved.get(&token.id()) {
            return Ok(serializer.value().clone());
        }

        let serializer = match token.intrinsic_serializer() {
            Some(serializer) => serializer,
            None => self
                .registered
                .get(&token.id())
                .map(|entry| entry.value().clone())
                .ok_or(Error::UnsupportedType { type_name: token.name() })?,
        };

        tracing::debug!(type_name = token.name(), "resolved serializer");

        Ok(self
            .resolved
            .entry(token.id())
            .or_insert(serializer)
            .value()
            .clone())
    }

    /// Registers the serializer used for `T`.
    ///
    /// Only types without an intrinsic shape accept a registered serializer.
    /// Registering again replaces the previous serializer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntrinsicShape`] if `T` already has a shape.
    pub fn register_serializer<T: Binary, S: Serializer>(
        &self,
        serializer: Arc<S>,
    ) -> Result<()> {
        if T::intrinsic_serializer().is_some() {
            return Err(Error::IntrinsicShape { type_name: type_name::<T>() });
        }

        let serializer: Arc<dyn Serializer> = serializer;
        self.registered.insert(TypeId::of::<T>(), serializer.clone());
        self.resolved.insert(TypeId::of::<T>(), serializer);

        tracing::info!(type_name = type_name::<T>(), "registered serializer");

        Ok(())
    }

    // =========================================================================
    // Class maps
    // =========================================================================

    /// Returns the class map registered or previously built for the given
    /// type.
    #[must_use]
    pub fn get_class_map(&self, token: TypeToken) -> Option<Arc<ClassMap>> {
        self.class_maps.get(&token.id()).map(|entry| entry.value().clone())
    }

    /// Registers the class map of `T`.
    ///
    /// The builder receives the default map of `T` (every member in
    /// declaration order, without overrides) and edits it.
    /// A previously registered or built map is replaced.
    ///
    /// # Errors
    ///
    /// Propagates the builder's error, typically
    /// [`Error::UnknownMember`]. Nothing is registered in that case.
    pub fn register_class_map<T: Record>(
        &self,
        build: impl FnOnce(&mut ClassMap) -> Result<()>,
    ) -> Result<()> {
        let mut class_map = ClassMap::from_accessors(&*self.accessors::<T>()?);
        build(&mut class_map)?;

        self.class_maps.insert(TypeId::of::<T>(), Arc::new(class_map));

        tracing::info!(type_name = type_name::<T>(), "registered class map");

        Ok(())
    }

    /// Removes the class map of the given type. The next serialization of
    /// the type rebuilds its default map.
    ///
    /// Returns `true` if a map was removed.
    pub fn unregister_class_map(&self, token: TypeToken) -> bool {
        let removed = self.class_maps.remove(&token.id()).is_some();

        if removed {
            tracing::info!(
                type_name = token.name(),
                "unregistered class map"
            );
        }

        removed
    }

    /// Returns the class map of `T`, building and caching the default map on
    /// first use.
    pub(crate) fn class_map_of<T: Record>(&self) -> Result<Arc<ClassMap>> {
        if let Some(class_map) = self.class_maps.get(&TypeId::of::<T>()) {
            return Ok(class_map.value().clone());
        }

        let class_map =
            Arc::new(ClassMap::from_accessors(&*self.accessors::<T>()?));

        tracing::debug!(
            type_name = type_name::<T>(),
            "built default class map"
        );

        Ok(self
            .class_maps
            .entry(TypeId::of::<T>())
            .or_insert(class_map)
            .value()
            .clone())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the cached accessor table of `T`, generating it on first use.
    pub(crate) fn accessors<T: Record>(
        &self,
    ) -> Result<Arc<ClassAccessors<T>>> {
        // the read guard must be released before `entry` locks the shard
        let cached = self
            .accessors
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone());

        let entry = match cached {
            Some(entry) => entry,
            None => self
                .accessors
                .entry(TypeId::of::<T>())
                .or_insert_with(|| -> Arc<dyn Any + Send + Sync> {
                    Arc::new(T::accessors())
                })
                .value()
                .clone(),
        };

        entry.downcast().map_err(|_| Error::TypeMismatch {
            expected: type_name::<ClassAccessors<T>>(),
        })
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("resolved", &self.resolved.len())
            .field("registered", &self.registered.len())
            .field("class_maps", &self.class_maps.len())
            .finish_non_exhaustive()
    }
}
