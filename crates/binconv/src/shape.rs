//! Static type knowledge: the [`Binary`] trait and [`TypeToken`].

use std::{
    any::{Any, TypeId, type_name},
    fmt::Debug,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::serializer::Serializer;

/// A type that can take part in binary serialization.
///
/// Every type the dispatcher reaches (the root value, record members,
/// container elements, tuple fields) must implement this trait. The
/// implementation declares the type's *intrinsic shape*, the serializer the
/// registry uses for it before looking at registered fallbacks.
///
/// Primitives, strings, `Option`, `Box`, `Vec`, maps, sets, tuples, `Uuid`,
/// decimals and the `chrono` date/time types are implemented by this crate.
/// Records and field-less enums implement it through
/// `#[derive(Binary)]`. A type that returns `None` can still be serialized
/// once a serializer is registered for it with
/// [`SerializerRegistry::register_serializer`].
///
/// [`SerializerRegistry::register_serializer`]:
///     crate::SerializerRegistry::register_serializer
pub trait Binary: Any {
    /// Returns the serializer implied by the type's shape, if it has one.
    #[must_use]
    fn intrinsic_serializer() -> Option<Arc<dyn Serializer>> { None }
}

/// A runtime handle on a [`Binary`] type.
///
/// Carries the type's identity, its name for diagnostics, and the means to
/// build its intrinsic serializer. This is what non-generic code (the
/// dispatcher, class maps, the `_dyn` facade functions) uses in place of a
/// type parameter.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
    intrinsic: fn() -> Option<Arc<dyn Serializer>>,
}

impl TypeToken {
    /// Returns the token of `T`.
    #[must_use]
    pub fn of<T: Binary>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            intrinsic: T::intrinsic_serializer,
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[must_use]
    pub const fn id(&self) -> TypeId { self.id }

    /// Returns the name of the type.
    #[must_use]
    pub const fn name(&self) -> &'static str { self.name }

    /// Builds the type's intrinsic serializer, if it has one.
    #[must_use]
    pub fn intrinsic_serializer(&self) -> Option<Arc<dyn Serializer>> {
        (self.intrinsic)()
    }

    /// Returns `true` if the token refers to `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool { self.id == TypeId::of::<T>() }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

impl Debug for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypeToken").field(&self.name).finish()
    }
}
