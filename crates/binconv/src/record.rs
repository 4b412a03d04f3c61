//! Accessor tables for record types.
//!
//! A [`Record`] describes how to construct an instance of itself and how to
//! read and write each of its members without knowing the members' types
//! statically. `#[derive(Binary)]` generates the table from the struct
//! definition; the registry caches it per type.

use std::any::Any;

use crate::{
    error::Result,
    shape::{Binary, TypeToken},
};

/// Reads a member of `T` as a type-erased reference.
pub type Getter<T> = fn(&T) -> &dyn Any;

/// Writes a decoded, type-erased value into a member of `T`.
pub type Setter<T> = fn(&mut T, Box<dyn Any>) -> Result<()>;

/// A type whose members are serialized one by one, in declaration order.
///
/// Usually implemented through `#[derive(Binary)]`. Fields marked
/// `#[binary(ignore)]` get no accessor and only need to be constructible:
///
/// ```ignore
/// #[derive(Default, Binary)]
/// struct Person {
///     name: String,
///     age: u32,
///     #[binary(ignore)]
///     cache: std::sync::Mutex<Vec<u8>>,
/// }
/// ```
pub trait Record: Binary + Sized {
    /// Returns the accessor table of the type.
    fn accessors() -> ClassAccessors<Self>;
}

/// The accessors of one member of `T`.
pub struct MemberAccessor<T> {
    name: &'static str,
    member_type: TypeToken,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> MemberAccessor<T> {
    /// Creates the accessors of a member named `name` whose type is
    /// `member_type`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        member_type: TypeToken,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        Self { name, member_type, get, set }
    }

    /// Returns the member name.
    #[must_use]
    pub const fn name(&self) -> &'static str { self.name }

    /// Returns the member's declared type.
    #[must_use]
    pub const fn member_type(&self) -> TypeToken { self.member_type }

    /// Reads the member of `record`.
    pub fn get<'r>(&self, record: &'r T) -> &'r dyn Any { (self.get)(record) }

    /// Writes `value` into the member of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) if
    /// `value` is not of the member's type.
    pub fn set(&self, record: &mut T, value: Box<dyn Any>) -> Result<()> {
        (self.set)(record, value)
    }
}

impl<T> std::fmt::Debug for MemberAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberAccessor")
            .field("name", &self.name)
            .field("member_type", &self.member_type)
            .finish_non_exhaustive()
    }
}

/// The constructor and member accessors of a record type `T`.
pub struct ClassAccessors<T> {
    constructor: Option<fn() -> T>,
    members: Vec<MemberAccessor<T>>,
}

impl<T> ClassAccessors<T> {
    /// Creates an accessor table. Records without a zero-argument
    /// constructor pass `None`; they can be serialized but not decoded.
    #[must_use]
    pub const fn new(
        constructor: Option<fn() -> T>,
        members: Vec<MemberAccessor<T>>,
    ) -> Self {
        Self { constructor, members }
    }

    /// Constructs a fresh instance, if the type has a constructor.
    #[must_use]
    pub fn construct(&self) -> Option<T> { self.constructor.map(|new| new()) }

    /// Returns the members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberAccessor<T>] { &self.members }

    /// Returns the member with the given name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberAccessor<T>> {
        self.members.iter().find(|member| member.name == name)
    }
}

impl<T> std::fmt::Debug for ClassAccessors<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassAccessors")
            .field("has_constructor", &self.constructor.is_some())
            .field("members", &self.members)
            .finish()
    }
}
