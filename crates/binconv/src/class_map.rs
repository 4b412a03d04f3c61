//! Per-member overrides for record types.

use std::sync::Arc;

use crate::{
    error::{Error, Result},
    record::{ClassAccessors, Record},
    serializer::Serializer,
    settings::SerializerArg,
    shape::TypeToken,
};

/// The members of a record type, in declaration order, with their
/// overrides.
///
/// A default class map lists every member of the record with no overrides.
/// Fields declared `#[binary(ignore)]` are not members. Registering a class
/// map edits that default; the member list itself never changes.
#[derive(Debug, Clone)]
pub struct ClassMap {
    type_name: &'static str,
    members: Vec<MemberMap>,
}

impl ClassMap {
    /// Builds the default class map from an accessor table.
    #[must_use]
    pub fn from_accessors<T: Record>(accessors: &ClassAccessors<T>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            members: accessors
                .members()
                .iter()
                .map(|member| MemberMap {
                    name: member.name(),
                    member_type: member.member_type(),
                    ignored: false,
                    serializer: None,
                    argument: None,
                })
                .collect(),
        }
    }

    /// Returns the name of the mapped type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str { self.type_name }

    /// Returns the member maps in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberMap] { &self.members }

    /// Returns the map of the member with the given name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberMap> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Returns the map of the member with the given name for editing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMember`] if the type has no such member.
    pub fn map_member(&mut self, name: &str) -> Result<&mut MemberMap> {
        let type_name = self.type_name;

        self.members.iter_mut().find(|member| member.name == name).ok_or_else(
            || Error::UnknownMember { type_name, member: name.to_owned() },
        )
    }
}

/// The overrides of one record member.
#[derive(Clone)]
pub struct MemberMap {
    name: &'static str,
    member_type: TypeToken,
    ignored: bool,
    serializer: Option<Arc<dyn Serializer>>,
    argument: Option<Arc<dyn SerializerArg>>,
}

impl MemberMap {
    /// Returns the member name.
    #[must_use]
    pub const fn name(&self) -> &'static str { self.name }

    /// Returns the member's declared type.
    #[must_use]
    pub const fn member_type(&self) -> TypeToken { self.member_type }

    /// Returns `true` if the member is skipped on encode and decode.
    #[must_use]
    pub const fn is_ignored(&self) -> bool { self.ignored }

    /// Returns the serializer used for the member instead of the one its
    /// type resolves to.
    #[must_use]
    pub fn serializer(&self) -> Option<&dyn Serializer> {
        self.serializer.as_deref()
    }

    /// Returns the argument passed to the member's serializer instead of the
    /// settings entry for its type.
    #[must_use]
    pub fn argument(&self) -> Option<&dyn SerializerArg> {
        self.argument.as_deref()
    }

    /// Skips the member. On decode it keeps the value the constructor gave
    /// it.
    pub fn ignore(&mut self) -> &mut Self { self.set_ignored(true) }

    /// Sets whether the member is skipped.
    pub const fn set_ignored(&mut self, ignored: bool) -> &mut Self {
        self.ignored = ignored;
        self
    }

    /// Serializes the member with `serializer`, bypassing resolution by
    /// type. The serializer must handle the member's declared type.
    pub fn set_serializer(
        &mut self,
        serializer: Arc<dyn Serializer>,
    ) -> &mut Self {
        self.serializer = Some(serializer);
        self
    }

    /// Passes `argument` to the member's serializer.
    pub fn set_argument(&mut self, argument: impl SerializerArg) -> &mut Self {
        self.argument = Some(Arc::new(argument));
        self
    }
}

impl std::fmt::Debug for MemberMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberMap")
            .field("name", &self.name)
            .field("member_type", &self.member_type)
            .field("ignored", &self.ignored)
            .field("has_serializer", &self.serializer.is_some())
            .field("argument", &self.argument)
            .finish()
    }
}
