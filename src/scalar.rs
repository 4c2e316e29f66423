//! Scalar protobuf types: wire codecs, defaults, and JSON mappings.
//!
//! Each protobuf scalar type maps to exactly one [`FieldKind`]. The types
//! that share a Rust representation but differ on the wire (`sint32` vs
//! `int32`, `fixed64` vs `uint64`, ...) get newtype wrappers so the field's
//! Rust type alone picks the codec.

use bytes::Bytes;
use serde_json::Value;

use crate::error::DecodeError;
use crate::leb128::LebCodec;
use crate::reader::Reader;
use crate::wire::{FieldKind, WireField};
use crate::writer::Writer;

/// A protobuf scalar type.
///
/// Covers wire framing in both directions, the proto3 zero-default, and
/// the canonical JSON mapping.
pub trait ProtoScalar:
    Clone + PartialEq + core::fmt::Debug + Default + Send + Sync + 'static
{
    /// The wire framing for this type.
    const KIND: FieldKind;

    /// Decode from a single wire field payload.
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError>;

    /// Decode one value from a packed stream.
    fn read(reader: &mut Reader) -> Result<Self, DecodeError>;

    /// Encode the payload (without a field key).
    fn write(&self, writer: &mut Writer);

    /// Number of bytes [`ProtoScalar::write`] emits.
    fn encoded_len(&self) -> usize;

    /// True if this value is the proto3 default.
    fn is_default(&self) -> bool;

    /// The canonical JSON representation.
    fn to_json(&self) -> Value;

    /// Parse from a JSON value.
    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError>;
}

#[inline]
pub(crate) const fn zigzag_encode_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub(crate) const fn zigzag_decode_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

#[inline]
pub(crate) const fn zigzag_encode_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub(crate) const fn zigzag_decode_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

// JSON helpers shared by the scalar impls. The canonical mapping accepts
// both JSON numbers and decimal strings for every integer type.

fn json_to_i64(value: &Value, name: &'static str) -> Result<i64, DecodeError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if let Some(f) = n.as_f64() {
                exact_int(f, name)
            } else {
                Err(DecodeError::illegal_value("number out of range", name))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::illegal_value("malformed integer string", name)),
        _ => Err(DecodeError::illegal_value(
            "expected JSON number or string",
            name,
        )),
    }
}

fn json_to_u64(value: &Value, name: &'static str) -> Result<u64, DecodeError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n.as_f64() {
                let v = exact_int(f, name)?;
                u64::try_from(v)
                    .map_err(|_| DecodeError::illegal_value("negative value for unsigned", name))
            } else {
                Err(DecodeError::illegal_value("number out of range", name))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| DecodeError::illegal_value("malformed integer string", name)),
        _ => Err(DecodeError::illegal_value(
            "expected JSON number or string",
            name,
        )),
    }
}

fn exact_int(f: f64, name: &'static str) -> Result<i64, DecodeError> {
    if f.fract() == 0.0 && f >= -9.007_199_254_740_992e15 && f <= 9.007_199_254_740_992e15 {
        Ok(f as i64)
    } else {
        Err(DecodeError::illegal_value(
            "number is not an exact integer",
            name,
        ))
    }
}

pub(crate) fn json_to_i32(value: &Value, name: &'static str) -> Result<i32, DecodeError> {
    let v = json_to_i64(value, name)?;
    i32::try_from(v).map_err(|_| DecodeError::illegal_value("out of range for int32", name))
}

fn json_to_u32(value: &Value, name: &'static str) -> Result<u32, DecodeError> {
    let v = json_to_u64(value, name)?;
    u32::try_from(v).map_err(|_| DecodeError::illegal_value("out of range for uint32", name))
}

fn json_to_f64(value: &Value, name: &'static str) -> Result<f64, DecodeError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DecodeError::illegal_value("number out of range", name)),
        Value::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other
                .trim()
                .parse::<f64>()
                .map_err(|_| DecodeError::illegal_value("malformed number string", name)),
        },
        _ => Err(DecodeError::illegal_value(
            "expected JSON number or string",
            name,
        )),
    }
}

/// Canonical JSON for a float: non-finite values become strings, exact
/// integers may be emitted as integers.
fn float_to_json(v: f64) -> Value {
    if v.is_nan() {
        Value::String("NaN".to_string())
    } else if v == f64::INFINITY {
        Value::String("Infinity".to_string())
    } else if v == f64::NEG_INFINITY {
        Value::String("-Infinity".to_string())
    } else if v == v.trunc() && v.abs() < 9.007_199_254_740_992e15 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

pub(crate) fn decode_base64(s: &str, name: &'static str) -> Result<Bytes, DecodeError> {
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
    use base64::Engine;

    STANDARD
        .decode(s)
        .or_else(|_| STANDARD_NO_PAD.decode(s))
        .or_else(|_| URL_SAFE.decode(s))
        .or_else(|_| URL_SAFE_NO_PAD.decode(s))
        .map(Bytes::from)
        .map_err(|_| DecodeError::illegal_value("invalid base64", name))
}

pub(crate) fn encode_base64(data: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    STANDARD.encode(data)
}

impl ProtoScalar for u64 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_varint(name)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint()
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(*self);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        self.encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0
    }

    fn to_json(&self) -> Value {
        // 64-bit integers serialize as strings to preserve precision.
        Value::String(self.to_string())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_u64(value, name)
    }
}

impl ProtoScalar for u32 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_varint(name).map(|v| v as u32)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint().map(|v| v as u32)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(u64::from(*self));
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        self.encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_u32(value, name)
    }
}

impl ProtoScalar for i64 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_varint(name).map(|v| v as i64)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint().map(|v| v as i64)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(*self as u64);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        (*self as u64).encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i64(value, name)
    }
}

impl ProtoScalar for i32 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        // int32 is encoded sign-extended to 64 bits.
        field.expect_varint(name).map(|v| v as i32)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint().map(|v| v as i32)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(*self as i64 as u64);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        (*self as i64 as u64).encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i32(value, name)
    }
}

impl ProtoScalar for bool {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_varint(name).map(|v| v != 0)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint().map(|v| v != 0)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(u64::from(*self));
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        1
    }

    #[inline]
    fn is_default(&self) -> bool {
        !*self
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s == "true" => Ok(true),
            Value::String(s) if s == "false" => Ok(false),
            _ => Err(DecodeError::illegal_value("expected JSON boolean", name)),
        }
    }
}

impl ProtoScalar for f64 {
    const KIND: FieldKind = FieldKind::Fixed64;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed64(name).map(f64::from_bits)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed64().map(f64::from_bits)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed64(self.to_bits());
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        8
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0.0
    }

    fn to_json(&self) -> Value {
        float_to_json(*self)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_f64(value, name)
    }
}

impl ProtoScalar for f32 {
    const KIND: FieldKind = FieldKind::Fixed32;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed32(name).map(f32::from_bits)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed32().map(f32::from_bits)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed32(self.to_bits());
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        4
    }

    #[inline]
    fn is_default(&self) -> bool {
        *self == 0.0
    }

    fn to_json(&self) -> Value {
        float_to_json(f64::from(*self))
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_f64(value, name).map(|v| v as f32)
    }
}

impl ProtoScalar for String {
    const KIND: FieldKind = FieldKind::LengthDelimited;

    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        let data = field.expect_len(name)?;
        let text = core::str::from_utf8(data)
            .map_err(|_| DecodeError::illegal_value("invalid UTF-8", name))?;
        Ok(text.to_owned())
    }

    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        let data = reader.read_length_delimited()?;
        let text = core::str::from_utf8(&data)
            .map_err(|_| DecodeError::illegal_value("invalid UTF-8", "string"))?;
        Ok(text.to_owned())
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_length_delimited(self.as_bytes());
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        (self.len() as u64).encoded_leb128_len() + self.len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| DecodeError::illegal_value("expected JSON string", name))
    }
}

impl ProtoScalar for Bytes {
    const KIND: FieldKind = FieldKind::LengthDelimited;

    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_len(name).cloned()
    }

    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_length_delimited()
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_length_delimited(self);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        (self.len() as u64).encoded_leb128_len() + self.len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn to_json(&self) -> Value {
        Value::String(encode_base64(self))
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        let s = value
            .as_str()
            .ok_or_else(|| DecodeError::illegal_value("expected JSON string", name))?;
        decode_base64(s, name)
    }
}

/// Declares a newtype wrapper for a scalar wire encoding.
macro_rules! scalar_wrapper {
    ($(#[$doc:meta])* $name:ident($inner:ty)) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl core::ops::Deref for $name {
            type Target = $inner;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

scalar_wrapper! {
    /// Wrapper for protobuf `sint32` (zigzag-encoded signed 32-bit integer).
    Sint32(i32)
}

scalar_wrapper! {
    /// Wrapper for protobuf `sint64` (zigzag-encoded signed 64-bit integer).
    Sint64(i64)
}

scalar_wrapper! {
    /// Wrapper for protobuf `fixed32` (little-endian unsigned 32-bit integer).
    Fixed32(u32)
}

scalar_wrapper! {
    /// Wrapper for protobuf `fixed64` (little-endian unsigned 64-bit integer).
    Fixed64(u64)
}

scalar_wrapper! {
    /// Wrapper for protobuf `sfixed32` (little-endian signed 32-bit integer).
    Sfixed32(i32)
}

scalar_wrapper! {
    /// Wrapper for protobuf `sfixed64` (little-endian signed 64-bit integer).
    Sfixed64(i64)
}

impl ProtoScalar for Sint32 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field
            .expect_varint(name)
            .map(|v| Sint32(zigzag_decode_32(v as u32)))
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader
            .read_varint()
            .map(|v| Sint32(zigzag_decode_32(v as u32)))
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(u64::from(zigzag_encode_32(self.0)));
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        zigzag_encode_32(self.0).encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::from(self.0)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i32(value, name).map(Sint32)
    }
}

impl ProtoScalar for Sint64 {
    const KIND: FieldKind = FieldKind::Varint;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field
            .expect_varint(name)
            .map(|v| Sint64(zigzag_decode_64(v)))
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_varint().map(|v| Sint64(zigzag_decode_64(v)))
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_varint(zigzag_encode_64(self.0));
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        zigzag_encode_64(self.0).encoded_leb128_len()
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::String(self.0.to_string())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i64(value, name).map(Sint64)
    }
}

impl ProtoScalar for Fixed32 {
    const KIND: FieldKind = FieldKind::Fixed32;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed32(name).map(Fixed32)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed32().map(Fixed32)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed32(self.0);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        4
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::from(self.0)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_u32(value, name).map(Fixed32)
    }
}

impl ProtoScalar for Fixed64 {
    const KIND: FieldKind = FieldKind::Fixed64;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed64(name).map(Fixed64)
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed64().map(Fixed64)
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed64(self.0);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        8
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::String(self.0.to_string())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_u64(value, name).map(Fixed64)
    }
}

impl ProtoScalar for Sfixed32 {
    const KIND: FieldKind = FieldKind::Fixed32;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed32(name).map(|v| Sfixed32(v as i32))
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed32().map(|v| Sfixed32(v as i32))
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed32(self.0 as u32);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        4
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::from(self.0)
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i32(value, name).map(Sfixed32)
    }
}

impl ProtoScalar for Sfixed64 {
    const KIND: FieldKind = FieldKind::Fixed64;

    #[inline]
    fn from_wire(field: &WireField, name: &'static str) -> Result<Self, DecodeError> {
        field.expect_fixed64(name).map(|v| Sfixed64(v as i64))
    }

    #[inline]
    fn read(reader: &mut Reader) -> Result<Self, DecodeError> {
        reader.read_fixed64().map(|v| Sfixed64(v as i64))
    }

    #[inline]
    fn write(&self, writer: &mut Writer) {
        writer.write_fixed64(self.0 as u64);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        8
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn to_json(&self) -> Value {
        Value::String(self.0.to_string())
    }

    fn from_json(value: &Value, name: &'static str) -> Result<Self, DecodeError> {
        json_to_i64(value, name).map(Sfixed64)
    }
}
