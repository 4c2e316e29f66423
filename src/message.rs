//! Traits implemented by generated message and enum types.

use bytes::Bytes;
use serde_json::Value;

use crate::decode::Strategy;
use crate::error::DecodeError;
use crate::json::JsonOptions;
use crate::reader::Reader;
use crate::spec::MessageSpec;
use crate::writer::{Writer, WriterMode};

/// A protobuf message type.
///
/// Generated code implements `NAME` and `spec()`; everything else is
/// provided. The spec is built once per type (generated code keeps it in a
/// `std::sync::LazyLock`) and drives the binary codec, the JSON codec, and
/// merging.
pub trait Message:
    Clone + Default + PartialEq + core::fmt::Debug + Send + Sync + Sized + 'static
{
    /// Fully qualified protobuf name, e.g. `google.protobuf.Duration`.
    const NAME: &'static str;

    /// The field spec driving this message's codecs.
    fn spec() -> &'static MessageSpec<Self>;

    /// Fully qualified protobuf name.
    fn name() -> &'static str {
        Self::NAME
    }

    /// Encode into a fresh [`Writer`] in the default mode.
    fn to_proto(&self) -> Writer {
        self.to_proto_with(WriterMode::Balanced)
    }

    /// Encode into a fresh [`Writer`] with the given allocation mode.
    fn to_proto_with(&self, mode: WriterMode) -> Writer {
        let mut writer = Writer::with_mode(mode);
        self.write_to(&mut writer);
        writer
    }

    /// Append this message's fields to an existing writer.
    fn write_to(&self, writer: &mut Writer) {
        crate::encode::write_fields(self, writer);
    }

    /// Number of bytes [`Message::write_to`] emits.
    fn encoded_len(&self) -> usize {
        crate::encode::encoded_len(self)
    }

    /// Decode a message, consuming the reader to exhaustion.
    fn from_proto(reader: &mut Reader) -> Result<Self, DecodeError> {
        crate::decode::from_reader(reader)
    }

    /// Decode with an explicit dispatch strategy.
    fn from_proto_with(strategy: Strategy, reader: &mut Reader) -> Result<Self, DecodeError> {
        crate::decode::from_reader_with(strategy, reader)
    }

    /// Decode from a byte buffer.
    fn from_proto_bytes(data: impl Into<Bytes>) -> Result<Self, DecodeError> {
        Self::from_proto(&mut Reader::new(data))
    }

    /// Serialize to the canonical protobuf JSON mapping.
    fn to_json(&self, options: &JsonOptions) -> Value {
        crate::json::to_json(self, options)
    }

    /// Parse from the canonical protobuf JSON mapping.
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        crate::json::from_json(value)
    }

    /// Field-wise merge of two messages; equivalent to decoding the
    /// concatenation of their encodings.
    fn merge(a: &Self, b: &Self) -> Self {
        crate::merge::merge(a, b)
    }
}

/// A protobuf enum type.
///
/// `Default` must return the first-declared variant (numeric value 0 in
/// proto3).
pub trait ProtoEnum:
    Clone + Copy + PartialEq + Eq + core::fmt::Debug + Default + Send + Sync + 'static
{
    /// Fully qualified protobuf name.
    const FULL_NAME: &'static str;

    /// Look up a variant by its declared number.
    fn from_i32(value: i32) -> Option<Self>;

    /// The declared number of this variant.
    fn to_i32(self) -> i32;

    /// The declared name of this variant, e.g. `PLANET_MARS`.
    fn name(self) -> &'static str;

    /// Look up a variant by its declared name.
    fn from_name(name: &str) -> Option<Self>;
}
