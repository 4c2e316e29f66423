//! Hand-expanded generated code for the `google.protobuf` well-known
//! types used by the JSON mapping tests.

use std::sync::LazyLock;

use bytes::Bytes;
use serde_json::Value as Json;

use protofold::codec;
use protofold::spec::{basic, map_field, oneof, repeated, Packing};
use protofold::wire::encoded_key_len;
use protofold::{
    DecodeError, JsonOptions, MapField, Message, MessageSpec, Oneof, ProtoEnum, WireField,
    WireType, Writer,
};

/// Declares a wrapper message (`google.protobuf.Int32Value` and friends):
/// a single `value` field at tag 1.
macro_rules! wrapper_message {
    ($name:ident, $full_name:literal, $ty:ty, $codec:expr) => {
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub value: $ty,
        }

        impl Message for $name {
            const NAME: &'static str = $full_name;

            fn spec() -> &'static MessageSpec<Self> {
                static SPEC: LazyLock<MessageSpec<$name>> = LazyLock::new(|| {
                    MessageSpec::builder($full_name)
                        .field(basic(
                            1,
                            "value",
                            "value",
                            $codec,
                            |m: &$name| &m.value,
                            |m: &mut $name| &mut m.value,
                        ))
                        .build()
                });
                &SPEC
            }
        }
    };
}

wrapper_message!(DoubleValue, "google.protobuf.DoubleValue", f64, codec::double());
wrapper_message!(FloatValue, "google.protobuf.FloatValue", f32, codec::float());
wrapper_message!(Int64Value, "google.protobuf.Int64Value", i64, codec::int64());
wrapper_message!(UInt64Value, "google.protobuf.UInt64Value", u64, codec::uint64());
wrapper_message!(Int32Value, "google.protobuf.Int32Value", i32, codec::int32());
wrapper_message!(UInt32Value, "google.protobuf.UInt32Value", u32, codec::uint32());
wrapper_message!(BoolValue, "google.protobuf.BoolValue", bool, codec::boolean());
wrapper_message!(StringValue, "google.protobuf.StringValue", String, codec::string());
wrapper_message!(BytesValue, "google.protobuf.BytesValue", Bytes, codec::bytes());

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Duration {
    pub seconds: i64,
    pub nanos: i32,
}

impl Message for Duration {
    const NAME: &'static str = "google.protobuf.Duration";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Duration>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.Duration")
                .field(basic(
                    1,
                    "seconds",
                    "seconds",
                    codec::int64(),
                    |m: &Duration| &m.seconds,
                    |m: &mut Duration| &mut m.seconds,
                ))
                .field(basic(
                    2,
                    "nanos",
                    "nanos",
                    codec::int32(),
                    |m: &Duration| &m.nanos,
                    |m: &mut Duration| &mut m.nanos,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Message for Timestamp {
    const NAME: &'static str = "google.protobuf.Timestamp";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Timestamp>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.Timestamp")
                .field(basic(
                    1,
                    "seconds",
                    "seconds",
                    codec::int64(),
                    |m: &Timestamp| &m.seconds,
                    |m: &mut Timestamp| &mut m.seconds,
                ))
                .field(basic(
                    2,
                    "nanos",
                    "nanos",
                    codec::int32(),
                    |m: &Timestamp| &m.nanos,
                    |m: &mut Timestamp| &mut m.nanos,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMask {
    pub paths: Vec<String>,
}

impl Message for FieldMask {
    const NAME: &'static str = "google.protobuf.FieldMask";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<FieldMask>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.FieldMask")
                .field(repeated(
                    1,
                    "paths",
                    "paths",
                    codec::string(),
                    Packing::NotPacked,
                    |m: &FieldMask| &m.paths,
                    |m: &mut FieldMask| &mut m.paths,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Empty {}

impl Message for Empty {
    const NAME: &'static str = "google.protobuf.Empty";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Empty>> =
            LazyLock::new(|| MessageSpec::builder("google.protobuf.Empty").build());
        &SPEC
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullValue {
    #[default]
    NullValue,
}

impl ProtoEnum for NullValue {
    const FULL_NAME: &'static str = "google.protobuf.NullValue";

    fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(NullValue::NullValue),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        0
    }

    fn name(self) -> &'static str {
        "NULL_VALUE"
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "NULL_VALUE" => Some(NullValue::NullValue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Struct {
    pub fields: MapField<String, Value>,
}

impl Message for Struct {
    const NAME: &'static str = "google.protobuf.Struct";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Struct>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.Struct")
                .field(map_field(
                    1,
                    "fields",
                    "fields",
                    codec::string(),
                    codec::message::<Value>(),
                    |m: &Struct| &m.fields,
                    |m: &mut Struct| &mut m.fields,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListValue {
    pub values: Vec<Value>,
}

impl Message for ListValue {
    const NAME: &'static str = "google.protobuf.ListValue";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<ListValue>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.ListValue")
                .field(repeated(
                    1,
                    "values",
                    "values",
                    codec::message::<Value>(),
                    Packing::NotPacked,
                    |m: &ListValue| &m.values,
                    |m: &mut ListValue| &mut m.values,
                ))
                .build()
        });
        &SPEC
    }
}

/// `google.protobuf.Value`: a dynamically typed value, one variant set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    pub kind: ValueKind,
}

impl Message for Value {
    const NAME: &'static str = "google.protobuf.Value";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Value>> = LazyLock::new(|| {
            MessageSpec::builder("google.protobuf.Value")
                .field(oneof(
                    "kind",
                    |m: &Value| &m.kind,
                    |m: &mut Value| &mut m.kind,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueKind {
    #[default]
    NotSet,
    NullValue(NullValue),
    NumberValue(f64),
    StringValue(String),
    BoolValue(bool),
    StructValue(Struct),
    ListValue(ListValue),
}

impl Oneof for ValueKind {
    const TAGS: &'static [u32] = &[1, 2, 3, 4, 5, 6];

    fn decode_variant(tag: u32, field: &WireField) -> Result<Self, DecodeError> {
        match tag {
            1 => Ok(ValueKind::NullValue(
                codec::enumeration::<NullValue>().decode(field, "null_value")?,
            )),
            2 => Ok(ValueKind::NumberValue(
                codec::double().decode(field, "number_value")?,
            )),
            3 => Ok(ValueKind::StringValue(
                codec::string().decode(field, "string_value")?,
            )),
            4 => Ok(ValueKind::BoolValue(
                codec::boolean().decode(field, "bool_value")?,
            )),
            5 => Ok(ValueKind::StructValue(
                codec::message::<Struct>().decode(field, "struct_value")?,
            )),
            6 => Ok(ValueKind::ListValue(
                codec::message::<ListValue>().decode(field, "list_value")?,
            )),
            _ => Ok(ValueKind::NotSet),
        }
    }

    fn encode_variant(&self, writer: &mut Writer) {
        match self {
            ValueKind::NotSet => {}
            ValueKind::NullValue(value) => {
                writer.write_tag(1, WireType::Varint);
                codec::enumeration::<NullValue>().write(value, writer);
            }
            ValueKind::NumberValue(value) => {
                writer.write_tag(2, WireType::I64);
                codec::double().write(value, writer);
            }
            ValueKind::StringValue(value) => {
                writer.write_tag(3, WireType::Len);
                codec::string().write(value, writer);
            }
            ValueKind::BoolValue(value) => {
                writer.write_tag(4, WireType::Varint);
                codec::boolean().write(value, writer);
            }
            ValueKind::StructValue(value) => {
                writer.write_tag(5, WireType::Len);
                codec::message::<Struct>().write(value, writer);
            }
            ValueKind::ListValue(value) => {
                writer.write_tag(6, WireType::Len);
                codec::message::<ListValue>().write(value, writer);
            }
        }
    }

    fn encoded_variant_len(&self) -> usize {
        match self {
            ValueKind::NotSet => 0,
            ValueKind::NullValue(value) => {
                encoded_key_len(1) + codec::enumeration::<NullValue>().encoded_len(value)
            }
            ValueKind::NumberValue(value) => encoded_key_len(2) + codec::double().encoded_len(value),
            ValueKind::StringValue(value) => encoded_key_len(3) + codec::string().encoded_len(value),
            ValueKind::BoolValue(value) => encoded_key_len(4) + codec::boolean().encoded_len(value),
            ValueKind::StructValue(value) => {
                encoded_key_len(5) + codec::message::<Struct>().encoded_len(value)
            }
            ValueKind::ListValue(value) => {
                encoded_key_len(6) + codec::message::<ListValue>().encoded_len(value)
            }
        }
    }

    fn variant_tag(&self) -> Option<u32> {
        match self {
            ValueKind::NotSet => None,
            ValueKind::NullValue(_) => Some(1),
            ValueKind::NumberValue(_) => Some(2),
            ValueKind::StringValue(_) => Some(3),
            ValueKind::BoolValue(_) => Some(4),
            ValueKind::StructValue(_) => Some(5),
            ValueKind::ListValue(_) => Some(6),
        }
    }

    fn variant_json(&self, options: &JsonOptions) -> Option<(&'static str, Json)> {
        match self {
            ValueKind::NotSet => None,
            ValueKind::NullValue(value) => Some((
                "nullValue",
                codec::enumeration::<NullValue>().to_json(value, options),
            )),
            ValueKind::NumberValue(value) => {
                Some(("numberValue", codec::double().to_json(value, options)))
            }
            ValueKind::StringValue(value) => {
                Some(("stringValue", codec::string().to_json(value, options)))
            }
            ValueKind::BoolValue(value) => {
                Some(("boolValue", codec::boolean().to_json(value, options)))
            }
            ValueKind::StructValue(value) => Some((
                "structValue",
                codec::message::<Struct>().to_json(value, options),
            )),
            ValueKind::ListValue(value) => Some((
                "listValue",
                codec::message::<ListValue>().to_json(value, options),
            )),
        }
    }

    fn variant_from_json(
        object: &serde_json::Map<String, Json>,
    ) -> Result<Option<Self>, DecodeError> {
        if let Some(value) = object.get("nullValue").or_else(|| object.get("null_value")) {
            return Ok(Some(ValueKind::NullValue(
                codec::enumeration::<NullValue>().from_json(value, "null_value")?,
            )));
        }
        if let Some(value) = object
            .get("numberValue")
            .or_else(|| object.get("number_value"))
        {
            return Ok(Some(ValueKind::NumberValue(
                codec::double().from_json(value, "number_value")?,
            )));
        }
        if let Some(value) = object
            .get("stringValue")
            .or_else(|| object.get("string_value"))
        {
            return Ok(Some(ValueKind::StringValue(
                codec::string().from_json(value, "string_value")?,
            )));
        }
        if let Some(value) = object.get("boolValue").or_else(|| object.get("bool_value")) {
            return Ok(Some(ValueKind::BoolValue(
                codec::boolean().from_json(value, "bool_value")?,
            )));
        }
        if let Some(value) = object
            .get("structValue")
            .or_else(|| object.get("struct_value"))
        {
            return Ok(Some(ValueKind::StructValue(
                codec::message::<Struct>().from_json(value, "struct_value")?,
            )));
        }
        if let Some(value) = object.get("listValue").or_else(|| object.get("list_value")) {
            return Ok(Some(ValueKind::ListValue(
                codec::message::<ListValue>().from_json(value, "list_value")?,
            )));
        }
        Ok(None)
    }
}
