//! The error type shared by every serializer, the registry and the codec.

use std::io;

/// Errors produced while resolving serializers, configuring the registry,
/// or encoding and decoding values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No serializer could be resolved for the type: it has no intrinsic
    /// shape and nothing was registered for it.
    #[error("no serializer is available for type `{type_name}`")]
    UnsupportedType {
        /// The name of the unresolvable type.
        type_name: &'static str,
    },

    /// A record type was decoded but declares no zero-argument constructor.
    #[error("type `{type_name}` has no constructor to decode into")]
    Construction {
        /// The name of the record type.
        type_name: &'static str,
    },

    /// The input is truncated, over-long or otherwise not a valid encoding
    /// of the expected type.
    #[error("malformed input: {reason}")]
    Malformed {
        /// A human-readable description of what was wrong.
        reason: String,
    },

    /// A serializer received (or produced) a value of a different type than
    /// the one it handles.
    #[error("type mismatch: expected a value of type `{expected}`")]
    TypeMismatch {
        /// The name of the type the serializer expected.
        expected: &'static str,
    },

    /// A serializer received an argument it does not understand or whose
    /// value is out of range.
    #[error("invalid serializer argument for `{type_name}`: {reason}")]
    InvalidArgument {
        /// The name of the type being serialized.
        type_name: &'static str,
        /// What was wrong with the argument.
        reason: String,
    },

    /// A value cannot be represented in the wire format of its type.
    #[error("value of type `{type_name}` cannot be encoded: {reason}")]
    OutOfRange {
        /// The name of the type being serialized.
        type_name: &'static str,
        /// Why the value is not representable.
        reason: String,
    },

    /// A class map referred to a member the record type does not have.
    #[error("type `{type_name}` has no member named `{member}`")]
    UnknownMember {
        /// The name of the record type.
        type_name: &'static str,
        /// The requested member name.
        member: String,
    },

    /// An absent value reached a serializer that opts out of the common null
    /// envelope without encoding absence itself.
    #[error("serializer `{serializer}` cannot encode an absent value")]
    NullUnsupported {
        /// The name of the serializer type.
        serializer: &'static str,
    },

    /// A fallback serializer was registered for a type that already has an
    /// intrinsic shape.
    #[error(
        "type `{type_name}` has an intrinsic shape and cannot take a \
         registered serializer"
    )]
    IntrinsicShape {
        /// The name of the type.
        type_name: &'static str,
    },

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(io::Error),
}

impl Error {
    /// Creates an [`Error::Malformed`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed { reason: reason.into() }
    }

    /// Returns `true` if this error describes malformed input.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Self::malformed("unexpected end of input")
        } else {
            Self::Io(error)
        }
    }
}

/// A specialized [`Result`](std::result::Result) for serialization
/// operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
