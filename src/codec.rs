//! Typed value codecs: the scalar-type constructors generated code uses to
//! build field specs.
//!
//! A [`Codec<T>`] describes one protobuf value type at a single level of
//! abstraction: how to decode it from a wire payload, encode it back,
//! measure it, compute its default, map it to and from JSON, and merge two
//! values of it. The same codec value drives the binary codec, the JSON
//! codec, and merging, so the two directions cannot disagree on framing or
//! defaults.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::DecodeError;
use crate::json::JsonOptions;
use crate::message::{Message, ProtoEnum};
use crate::reader::Reader;
use crate::scalar::{Fixed32, Fixed64, ProtoScalar, Sfixed32, Sfixed64, Sint32, Sint64};
use crate::wire::{FieldKind, WireField};
use crate::writer::Writer;

type DecodeFn<T> = Box<dyn Fn(&WireField, &'static str) -> Result<T, DecodeError> + Send + Sync>;
type ReadFn<T> = Box<dyn Fn(&mut Reader) -> Result<T, DecodeError> + Send + Sync>;
type WriteFn<T> = Box<dyn Fn(&T, &mut Writer) + Send + Sync>;
type LenFn<T> = Box<dyn Fn(&T) -> usize + Send + Sync>;
type DefaultFn<T> = Box<dyn Fn() -> T + Send + Sync>;
type IsDefaultFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type MergeFn<T> = Box<dyn Fn(&mut T, &T) + Send + Sync>;
type ToJsonFn<T> = Box<dyn Fn(&T, &JsonOptions) -> Value + Send + Sync>;
type FromJsonFn<T> = Box<dyn Fn(&Value, &'static str) -> Result<T, DecodeError> + Send + Sync>;

struct Vtable<T> {
    kind: FieldKind,
    decode: DecodeFn<T>,
    read: ReadFn<T>,
    write: WriteFn<T>,
    encoded_len: LenFn<T>,
    default: DefaultFn<T>,
    is_default: IsDefaultFn<T>,
    merge: MergeFn<T>,
    to_json: ToJsonFn<T>,
    from_json: FromJsonFn<T>,
}

/// A typed description of one protobuf value type.
pub struct Codec<T> {
    vtable: Arc<Vtable<T>>,
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Codec {
            vtable: Arc::clone(&self.vtable),
        }
    }
}

impl<T> core::fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codec")
            .field("kind", &self.vtable.kind)
            .finish()
    }
}

impl<T: 'static> Codec<T> {
    /// The wire framing values of this type use.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.vtable.kind
    }

    /// Decode a value from a single wire field payload.
    #[inline]
    pub fn decode(&self, field: &WireField, name: &'static str) -> Result<T, DecodeError> {
        (self.vtable.decode)(field, name)
    }

    /// Decode one value from a packed stream.
    #[inline]
    pub fn read(&self, reader: &mut Reader) -> Result<T, DecodeError> {
        (self.vtable.read)(reader)
    }

    /// Encode the payload (without a field key).
    #[inline]
    pub fn write(&self, value: &T, writer: &mut Writer) {
        (self.vtable.write)(value, writer)
    }

    /// Number of bytes [`Codec::write`] emits.
    #[inline]
    pub fn encoded_len(&self, value: &T) -> usize {
        (self.vtable.encoded_len)(value)
    }

    /// The default value of this type.
    #[inline]
    pub fn default_value(&self) -> T {
        (self.vtable.default)()
    }

    /// True if `value` is the proto3 default.
    #[inline]
    pub fn is_default(&self, value: &T) -> bool {
        (self.vtable.is_default)(value)
    }

    /// Merge `src` into `dst`: overwrite for scalars and enums, recursive
    /// field-wise merge for messages.
    #[inline]
    pub fn merge_value(&self, dst: &mut T, src: &T) {
        (self.vtable.merge)(dst, src)
    }

    /// The canonical JSON representation of `value`.
    #[inline]
    pub fn to_json(&self, value: &T, options: &JsonOptions) -> Value {
        (self.vtable.to_json)(value, options)
    }

    /// Parse a value from JSON.
    #[inline]
    pub fn from_json(&self, value: &Value, name: &'static str) -> Result<T, DecodeError> {
        (self.vtable.from_json)(value, name)
    }

    /// Lift this codec to heap-allocated values.
    ///
    /// Used for message fields that would otherwise make a type infinitely
    /// sized (message A containing message B containing A).
    pub fn boxed(self) -> Codec<Box<T>>
    where
        T: Send + Sync,
    {
        let c = self;
        Codec {
            vtable: Arc::new(Vtable {
                kind: c.kind(),
                decode: {
                    let c = c.clone();
                    Box::new(move |field, name| c.decode(field, name).map(Box::new))
                },
                read: {
                    let c = c.clone();
                    Box::new(move |reader| c.read(reader).map(Box::new))
                },
                write: {
                    let c = c.clone();
                    Box::new(move |value, writer| c.write(value, writer))
                },
                encoded_len: {
                    let c = c.clone();
                    Box::new(move |value| c.encoded_len(value))
                },
                default: {
                    let c = c.clone();
                    Box::new(move || Box::new(c.default_value()))
                },
                is_default: {
                    let c = c.clone();
                    Box::new(move |value| c.is_default(value))
                },
                merge: {
                    let c = c.clone();
                    Box::new(move |dst, src| c.merge_value(dst, src))
                },
                to_json: {
                    let c = c.clone();
                    Box::new(move |value, options| c.to_json(value, options))
                },
                from_json: {
                    Box::new(move |value, name| c.from_json(value, name).map(Box::new))
                },
            }),
        }
    }
}

/// Build a codec from a [`ProtoScalar`] implementation.
pub fn scalar<T: ProtoScalar>() -> Codec<T> {
    Codec {
        vtable: Arc::new(Vtable {
            kind: T::KIND,
            decode: Box::new(|field, name| T::from_wire(field, name)),
            read: Box::new(|reader| T::read(reader)),
            write: Box::new(|value: &T, writer| value.write(writer)),
            encoded_len: Box::new(|value: &T| value.encoded_len()),
            default: Box::new(T::default),
            is_default: Box::new(|value: &T| value.is_default()),
            merge: Box::new(|dst, src| *dst = src.clone()),
            to_json: Box::new(|value: &T, _options| value.to_json()),
            from_json: Box::new(|value, name| T::from_json(value, name)),
        }),
    }
}

/// Protobuf `double`.
pub fn double() -> Codec<f64> {
    scalar()
}

/// Protobuf `float`.
pub fn float() -> Codec<f32> {
    scalar()
}

/// Protobuf `int32`.
pub fn int32() -> Codec<i32> {
    scalar()
}

/// Protobuf `int64`.
pub fn int64() -> Codec<i64> {
    scalar()
}

/// Protobuf `uint32`.
pub fn uint32() -> Codec<u32> {
    scalar()
}

/// Protobuf `uint64`.
pub fn uint64() -> Codec<u64> {
    scalar()
}

/// Protobuf `sint32` (zigzag).
pub fn sint32() -> Codec<Sint32> {
    scalar()
}

/// Protobuf `sint64` (zigzag).
pub fn sint64() -> Codec<Sint64> {
    scalar()
}

/// Protobuf `fixed32`.
pub fn fixed32() -> Codec<Fixed32> {
    scalar()
}

/// Protobuf `fixed64`.
pub fn fixed64() -> Codec<Fixed64> {
    scalar()
}

/// Protobuf `sfixed32`.
pub fn sfixed32() -> Codec<Sfixed32> {
    scalar()
}

/// Protobuf `sfixed64`.
pub fn sfixed64() -> Codec<Sfixed64> {
    scalar()
}

/// Protobuf `bool`.
pub fn boolean() -> Codec<bool> {
    scalar()
}

/// Protobuf `string`.
pub fn string() -> Codec<String> {
    scalar()
}

/// Protobuf `bytes`.
pub fn bytes() -> Codec<Bytes> {
    scalar()
}

/// Protobuf `enum`, for a generated [`ProtoEnum`] type.
///
/// Wire values with no declared variant fail with `UnknownEnumValue`;
/// generated enums that want to preserve the raw integer declare an
/// unrecognized variant and absorb it in `from_i32`.
pub fn enumeration<E: ProtoEnum>() -> Codec<E> {
    Codec {
        vtable: Arc::new(Vtable {
            kind: FieldKind::Varint,
            decode: Box::new(|field, name| {
                let raw = field.expect_varint(name)? as i32;
                E::from_i32(raw).ok_or_else(|| DecodeError::unknown_enum_value(raw, name))
            }),
            read: Box::new(|reader| {
                let raw = reader.read_varint()? as i32;
                E::from_i32(raw).ok_or_else(|| DecodeError::unknown_enum_value(raw, "enum"))
            }),
            write: Box::new(|value: &E, writer| {
                writer.write_varint(i64::from(value.to_i32()) as u64)
            }),
            encoded_len: Box::new(|value: &E| {
                use crate::leb128::LebCodec;
                (i64::from(value.to_i32()) as u64).encoded_leb128_len()
            }),
            default: Box::new(E::default),
            is_default: Box::new(|value: &E| *value == E::default()),
            merge: Box::new(|dst, src| *dst = *src),
            to_json: Box::new(|value: &E, options| {
                // google.protobuf.NullValue is the one enum whose canonical
                // JSON form is the null literal.
                if E::FULL_NAME == "google.protobuf.NullValue" {
                    Value::Null
                } else if options.enum_names {
                    Value::String(value.name().to_string())
                } else {
                    Value::from(value.to_i32())
                }
            }),
            from_json: Box::new(|value, name| match value {
                Value::Null => Ok(E::default()),
                Value::String(s) => {
                    if let Some(v) = E::from_name(s) {
                        Ok(v)
                    } else if let Ok(raw) = s.parse::<i32>() {
                        E::from_i32(raw).ok_or_else(|| DecodeError::unknown_enum_value(raw, name))
                    } else {
                        Err(DecodeError::illegal_value("unknown enum name", name))
                    }
                }
                Value::Number(_) => {
                    let raw = crate::scalar::json_to_i32(value, name)?;
                    E::from_i32(raw).ok_or_else(|| DecodeError::unknown_enum_value(raw, name))
                }
                _ => Err(DecodeError::illegal_value(
                    "expected enum name or number",
                    name,
                )),
            }),
        }),
    }
}

/// Protobuf embedded message, for a generated [`Message`] type.
///
/// The payload is length-delimited; merging two values merges field-wise
/// per protobuf semantics.
pub fn message<M: Message>() -> Codec<M> {
    Codec {
        vtable: Arc::new(Vtable {
            kind: FieldKind::LengthDelimited,
            decode: Box::new(|field, name| {
                let data = field.expect_len(name)?;
                let mut reader = Reader::new(data.clone());
                crate::decode::from_reader(&mut reader)
            }),
            read: Box::new(|reader| {
                let data = reader.read_length_delimited()?;
                let mut reader = Reader::new(data);
                crate::decode::from_reader(&mut reader)
            }),
            write: Box::new(|value: &M, writer| {
                let len = crate::encode::encoded_len(value);
                writer.write_varint(len as u64);
                crate::encode::write_fields(value, writer);
            }),
            encoded_len: Box::new(|value: &M| {
                use crate::leb128::LebCodec;
                let len = crate::encode::encoded_len(value);
                (len as u64).encoded_leb128_len() + len
            }),
            default: Box::new(M::default),
            // Sub-messages are never elided by value; presence is carried
            // by the surrounding Option.
            is_default: Box::new(|_value: &M| false),
            merge: Box::new(|dst, src| crate::merge::merge_into(dst, src)),
            to_json: Box::new(|value: &M, options| crate::json::to_json(value, options)),
            from_json: Box::new(|value, _name| crate::json::from_json(value)),
        }),
    }
}
