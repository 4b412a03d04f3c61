//! Per-operation configuration.
//!
//! [`SerializerSettings`] attaches a [`SerializerArg`] to a type. Whenever the
//! dispatcher serializes a value of that type without an explicit per-member
//! argument, the serializer receives the configured one. Arguments are keyed
//! by the type they configure, so unrelated serializers never see each
//! other's configuration.
//!
//! # Example
//!
//! ```ignore
//! use binconv::{SerializerSettings, serializers::time::DateTimeArg};
//! use chrono::NaiveDateTime;
//!
//! let settings = SerializerSettings::new()
//!     .with_argument::<NaiveDateTime>(DateTimeArg::SECONDS);
//!
//! let bytes = binconv::serialize(&timestamp, Some(&settings))?;
//! ```

use std::{
    any::{Any, TypeId},
    fmt::Debug,
    sync::Arc,
};

use fxhash::FxHashMap;

#[cfg(test)]
mod test;

/// A configuration payload understood by one or more serializers.
///
/// The dispatcher forwards the argument unopened; the serializer that
/// receives it downcasts to the concrete kind it understands via
/// [`downcast_ref`](trait.SerializerArg.html#method.downcast_ref).
pub trait SerializerArg: Any + Debug + Send + Sync + 'static {}

impl dyn SerializerArg {
    /// Returns the argument as `T` if it is one.
    #[must_use]
    pub fn downcast_ref<T: SerializerArg>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    /// Returns `true` if the argument is a `T`.
    #[must_use]
    pub fn is<T: SerializerArg>(&self) -> bool { (self as &dyn Any).is::<T>() }
}

/// Arguments keyed by the type they configure.
///
/// Settings are built by the caller, passed by reference into one operation
/// and never mutated while that operation runs.
#[derive(Clone, Default)]
pub struct SerializerSettings {
    arguments: FxHashMap<TypeId, Arc<dyn SerializerArg>>,
}

impl SerializerSettings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self { Self { arguments: FxHashMap::default() } }

    /// Sets the argument used for values of type `T`, returning the one it
    /// replaces.
    pub fn insert_argument<T: Any>(
        &mut self,
        argument: impl SerializerArg,
    ) -> Option<Arc<dyn SerializerArg>> {
        self.arguments.insert(TypeId::of::<T>(), Arc::new(argument))
    }

    /// Builder-style variant of [`Self::insert_argument`].
    #[must_use]
    pub fn with_argument<T: Any>(
        mut self,
        argument: impl SerializerArg,
    ) -> Self {
        self.insert_argument::<T>(argument);
        self
    }

    /// Removes the argument configured for type `T`.
    pub fn remove_argument<T: Any>(
        &mut self,
    ) -> Option<Arc<dyn SerializerArg>> {
        self.arguments.remove(&TypeId::of::<T>())
    }

    /// Returns the argument configured for the type with the given id.
    #[must_use]
    pub fn argument_for(&self, type_id: TypeId) -> Option<&dyn SerializerArg> {
        self.arguments.get(&type_id).map(|argument| &**argument)
    }

    /// Returns the number of configured types.
    #[must_use]
    pub fn len(&self) -> usize { self.arguments.len() }

    /// Returns `true` if no argument is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.arguments.is_empty() }
}

impl Debug for SerializerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerSettings")
            .field("count", &self.arguments.len())
            .finish_non_exhaustive()
    }
}
