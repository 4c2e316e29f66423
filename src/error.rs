use core::fmt;

use crate::wire::FieldKind;

/// Error returned when decoding a message from the wire or from JSON fails.
///
/// A single malformed field fails the whole message; encoding is total and
/// has no error type.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
}

/// The different ways decoding can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    /// The buffer ended in the middle of a value.
    Truncated,
    /// A varint used more bytes than its target type allows.
    VarintOverflow,
    /// The 3-bit wire type of a field key is not one we recognize.
    IllegalWireType { value: u8 },
    /// A field key carried a field number of 0 or above 2^29-1.
    InvalidKey { value: u64 },
    /// The wire framing of a field does not match its declared type.
    WrongFieldType {
        expected: FieldKind,
        actual: FieldKind,
        field: &'static str,
    },
    /// A payload was framed correctly but its contents are malformed.
    IllegalValue {
        what: &'static str,
        field: &'static str,
    },
    /// An enum field carried an integer with no declared variant.
    UnknownEnumValue { value: i32, field: &'static str },
    /// A required oneof had no variant set.
    OneofMissing { field: &'static str },
    /// A proto2 `required` field was absent from the wire.
    RequiredFieldMissing { tag: u32, name: &'static str },
    /// A length prefix exceeds what this platform can address.
    LengthOverflow { value: u64 },
    /// A wire feature we deliberately do not support (e.g. groups).
    NotImplemented { feature: &'static str },
}

impl DecodeError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    pub(crate) fn truncated() -> Self {
        DecodeErrorKind::Truncated.into()
    }

    pub(crate) fn varint_overflow() -> Self {
        DecodeErrorKind::VarintOverflow.into()
    }

    pub(crate) fn illegal_wire_type(value: u8) -> Self {
        DecodeErrorKind::IllegalWireType { value }.into()
    }

    pub(crate) fn invalid_key(value: u64) -> Self {
        DecodeErrorKind::InvalidKey { value }.into()
    }

    pub(crate) fn wrong_field_type(
        expected: FieldKind,
        actual: FieldKind,
        field: &'static str,
    ) -> Self {
        DecodeErrorKind::WrongFieldType {
            expected,
            actual,
            field,
        }
        .into()
    }

    pub(crate) fn illegal_value(what: &'static str, field: &'static str) -> Self {
        DecodeErrorKind::IllegalValue { what, field }.into()
    }

    pub(crate) fn unknown_enum_value(value: i32, field: &'static str) -> Self {
        DecodeErrorKind::UnknownEnumValue { value, field }.into()
    }

    pub(crate) fn oneof_missing(field: &'static str) -> Self {
        DecodeErrorKind::OneofMissing { field }.into()
    }

    pub(crate) fn required_field_missing(tag: u32, name: &'static str) -> Self {
        DecodeErrorKind::RequiredFieldMissing { tag, name }.into()
    }

    pub(crate) fn length_overflow(value: u64) -> Self {
        DecodeErrorKind::LengthOverflow { value }.into()
    }

    pub(crate) fn not_implemented(feature: &'static str) -> Self {
        DecodeErrorKind::NotImplemented { feature }.into()
    }
}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        DecodeError { kind }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::Truncated => {
                write!(f, "unexpected end of buffer")
            }
            DecodeErrorKind::VarintOverflow => {
                write!(f, "varint overflows its target type")
            }
            DecodeErrorKind::IllegalWireType { value } => {
                write!(f, "invalid 'wire type' value: {value}")
            }
            DecodeErrorKind::InvalidKey { value } => {
                write!(f, "invalid field key: {value}")
            }
            DecodeErrorKind::WrongFieldType {
                expected,
                actual,
                field,
            } => {
                write!(
                    f,
                    "field '{field}' expected {expected} payload, got {actual}"
                )
            }
            DecodeErrorKind::IllegalValue { what, field } => {
                write!(f, "illegal value for field '{field}': {what}")
            }
            DecodeErrorKind::UnknownEnumValue { value, field } => {
                write!(f, "unknown enum value {value} for field '{field}'")
            }
            DecodeErrorKind::OneofMissing { field } => {
                write!(f, "missing required oneof field: '{field}'")
            }
            DecodeErrorKind::RequiredFieldMissing { tag, name } => {
                write!(f, "missing required field '{name}' (tag {tag})")
            }
            DecodeErrorKind::LengthOverflow { value } => {
                write!(
                    f,
                    "length prefix {value} exceeds platform addressable memory"
                )
            }
            DecodeErrorKind::NotImplemented { feature } => {
                write!(f, "not implemented: {feature}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
