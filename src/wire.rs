//! Wire format primitives for Google's Protocol Buffers, aka
//! [protobuf](https://protobuf.dev).
//!
//! An encoded message is a sequence of key-value records. The key is a
//! varint combining a field number and a 3-bit [`WireType`]; the wire type
//! determines how the following payload is framed.

use bytes::Bytes;

use crate::error::DecodeError;
use crate::leb128::LebCodec;
use crate::reader::Reader;
use crate::writer::Writer;

/// Minimum value of a protobuf field number.
pub const MINIMUM_TAG_VAL: u32 = 1;
/// Maximum value of a protobuf field number.
pub const MAXIMUM_TAG_VAL: u32 = (1 << 29) - 1;

/// Denotes the framing of a field in an encoded protobuf message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer.
    ///
    /// Used for: `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`,
    /// `bool`, `enum`.
    Varint = 0,
    /// 64-bit integer.
    ///
    /// Used for: `fixed64`, `sfixed64`, `double`.
    I64 = 1,
    /// Variable length field.
    ///
    /// Used for: `string`, `bytes`, `message`, packed `repeated` fields.
    Len = 2,
    /// Group start (deprecated, not supported).
    SGroup = 3,
    /// Group end (deprecated, not supported).
    EGroup = 4,
    /// 32-bit integer.
    ///
    /// Used for: `fixed32`, `sfixed32`, `float`.
    I32 = 5,
}

impl WireType {
    /// Try to decode a [`WireType`] from the provided raw value.
    #[inline]
    pub fn try_from_val(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::SGroup),
            4 => Ok(WireType::EGroup),
            5 => Ok(WireType::I32),
            other => Err(DecodeError::illegal_wire_type(other)),
        }
    }

    /// Return the raw value for this [`WireType`].
    #[inline]
    pub const fn into_val(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = DecodeError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, DecodeError> {
        WireType::try_from_val(value)
    }
}

/// Returns the encoded length of a field key (tag + wire type).
///
/// The wire type only occupies the low 3 bits, so it never changes the
/// varint length.
#[inline]
pub fn encoded_key_len(tag: u32) -> usize {
    (tag << 3).encoded_leb128_len()
}

/// The four payload framings a declared field can use.
///
/// Unlike [`WireType`] this has no group variants; every protobuf scalar
/// type maps to exactly one kind. The kind decides how a [`Reader`] frames
/// the payload and whether a repeated field may be packed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Varint,
    Fixed32,
    Fixed64,
    LengthDelimited,
}

impl FieldKind {
    /// The wire type used when a field of this kind is emitted.
    #[inline]
    pub const fn wire_type(self) -> WireType {
        match self {
            FieldKind::Varint => WireType::Varint,
            FieldKind::Fixed32 => WireType::I32,
            FieldKind::Fixed64 => WireType::I64,
            FieldKind::LengthDelimited => WireType::Len,
        }
    }

    /// Whether repeated fields of this kind may use the packed encoding.
    #[inline]
    pub const fn is_packable(self) -> bool {
        !matches!(self, FieldKind::LengthDelimited)
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FieldKind::Varint => "varint",
            FieldKind::Fixed32 => "fixed32",
            FieldKind::Fixed64 => "fixed64",
            FieldKind::LengthDelimited => "length-delimited",
        };
        f.write_str(name)
    }
}

/// A single decoded wire field payload.
///
/// Produced by [`Reader::read_field`] and consumed by typed decoders within
/// one field-decoding step. Length-delimited payloads hold a zero-copy
/// slice of the input buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum WireField {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    LengthDelimited(Bytes),
}

impl WireField {
    /// The [`FieldKind`] this payload was framed as.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        match self {
            WireField::Varint(_) => FieldKind::Varint,
            WireField::Fixed32(_) => FieldKind::Fixed32,
            WireField::Fixed64(_) => FieldKind::Fixed64,
            WireField::LengthDelimited(_) => FieldKind::LengthDelimited,
        }
    }

    /// The wire type this payload is emitted with.
    #[inline]
    pub fn wire_type(&self) -> WireType {
        self.kind().wire_type()
    }

    /// Read one payload of the given kind from the reader.
    pub fn read(kind: FieldKind, reader: &mut Reader) -> Result<WireField, DecodeError> {
        Ok(match kind {
            FieldKind::Varint => WireField::Varint(reader.read_varint()?),
            FieldKind::Fixed32 => WireField::Fixed32(reader.read_fixed32()?),
            FieldKind::Fixed64 => WireField::Fixed64(reader.read_fixed64()?),
            FieldKind::LengthDelimited => {
                WireField::LengthDelimited(reader.read_length_delimited()?)
            }
        })
    }

    /// Write this payload (without a field key) to the writer.
    pub fn write_payload(&self, writer: &mut Writer) {
        match self {
            WireField::Varint(v) => writer.write_varint(*v),
            WireField::Fixed32(v) => writer.write_fixed32(*v),
            WireField::Fixed64(v) => writer.write_fixed64(*v),
            WireField::LengthDelimited(data) => writer.write_length_delimited(data),
        }
    }

    /// The number of bytes [`WireField::write_payload`] emits.
    pub fn payload_len(&self) -> usize {
        match self {
            WireField::Varint(v) => v.encoded_leb128_len(),
            WireField::Fixed32(_) => 4,
            WireField::Fixed64(_) => 8,
            WireField::LengthDelimited(data) => {
                (data.len() as u64).encoded_leb128_len() + data.len()
            }
        }
    }

    /// Expect a varint payload, failing with `WrongFieldType` otherwise.
    #[inline]
    pub fn expect_varint(&self, field: &'static str) -> Result<u64, DecodeError> {
        match self {
            WireField::Varint(v) => Ok(*v),
            other => Err(DecodeError::wrong_field_type(
                FieldKind::Varint,
                other.kind(),
                field,
            )),
        }
    }

    /// Expect a fixed 32-bit payload.
    #[inline]
    pub fn expect_fixed32(&self, field: &'static str) -> Result<u32, DecodeError> {
        match self {
            WireField::Fixed32(v) => Ok(*v),
            other => Err(DecodeError::wrong_field_type(
                FieldKind::Fixed32,
                other.kind(),
                field,
            )),
        }
    }

    /// Expect a fixed 64-bit payload.
    #[inline]
    pub fn expect_fixed64(&self, field: &'static str) -> Result<u64, DecodeError> {
        match self {
            WireField::Fixed64(v) => Ok(*v),
            other => Err(DecodeError::wrong_field_type(
                FieldKind::Fixed64,
                other.kind(),
                field,
            )),
        }
    }

    /// Expect a length-delimited payload.
    #[inline]
    pub fn expect_len(&self, field: &'static str) -> Result<&Bytes, DecodeError> {
        match self {
            WireField::LengthDelimited(data) => Ok(data),
            other => Err(DecodeError::wrong_field_type(
                FieldKind::LengthDelimited,
                other.kind(),
                field,
            )),
        }
    }
}
