//! Hand-expanded generated code for the test messages.
//!
//! This is what the code generator emits for the example schema: a record
//! per message, an enum per protobuf enum, a oneof enum with a `NotSet`
//! sentinel, and a spec built once per type from the runtime combinators.
//!
//! ```protobuf
//! syntax = "proto3";
//! package example;
//!
//! enum Planet { EARTH = 0; MARS = 1; VENUS = 2; }
//!
//! message Address {
//!   string street = 1;
//!   int32 number = 2;
//!   Planet planet = 3;
//! }
//!
//! message Person {
//!   string name = 1;
//!   int32 id = 2;
//!   repeated string emails = 3;
//!   repeated int32 scores = 4;
//!   map<string, int32> attributes = 5;
//!   Address address = 6;
//!   uint64 token = 7;
//!   bytes blob = 8;
//!   oneof contact {
//!     string phone = 9;
//!     Address postal = 10;
//!   }
//!   optional bool verified = 11;
//!   Planet home_planet = 12;
//! }
//! ```
//!
//! plus a proto2 `LegacyRecord` with a required field, an explicit
//! default, and an extension range, a recursive `TreeNode`, and a
//! `Scalars` message covering every scalar type.

#![allow(dead_code)]

pub mod wkt;

use std::sync::LazyLock;

use bytes::Bytes;
use serde_json::Value as Json;

use protofold::codec;
use protofold::spec::{
    basic, basic_default, basic_opt, basic_req, map_field, oneof, repeated, Packing,
};
use protofold::wire::encoded_key_len;
use protofold::{
    DecodeError, Extension, ExtensionSet, JsonOptions, MapField, Message, MessageSpec, Oneof,
    ProtoEnum, ServiceMethod, WireField, WireType, Writer,
};
use protofold::{Fixed32, Fixed64, Sfixed32, Sfixed64, Sint32, Sint64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Planet {
    #[default]
    Earth,
    Mars,
    Venus,
}

impl ProtoEnum for Planet {
    const FULL_NAME: &'static str = "example.Planet";

    fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Planet::Earth),
            1 => Some(Planet::Mars),
            2 => Some(Planet::Venus),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        match self {
            Planet::Earth => 0,
            Planet::Mars => 1,
            Planet::Venus => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Planet::Earth => "EARTH",
            Planet::Mars => "MARS",
            Planet::Venus => "VENUS",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "EARTH" => Some(Planet::Earth),
            "MARS" => Some(Planet::Mars),
            "VENUS" => Some(Planet::Venus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub street: String,
    pub number: i32,
    pub planet: Planet,
}

impl Message for Address {
    const NAME: &'static str = "example.Address";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Address>> = LazyLock::new(|| {
            MessageSpec::builder("example.Address")
                .field(basic(
                    1,
                    "street",
                    "street",
                    codec::string(),
                    |m: &Address| &m.street,
                    |m: &mut Address| &mut m.street,
                ))
                .field(basic(
                    2,
                    "number",
                    "number",
                    codec::int32(),
                    |m: &Address| &m.number,
                    |m: &mut Address| &mut m.number,
                ))
                .field(basic(
                    3,
                    "planet",
                    "planet",
                    codec::enumeration::<Planet>(),
                    |m: &Address| &m.planet,
                    |m: &mut Address| &mut m.planet,
                ))
                .build()
        });
        &SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Contact {
    #[default]
    NotSet,
    Phone(String),
    Postal(Address),
}

impl Oneof for Contact {
    const TAGS: &'static [u32] = &[9, 10];

    fn decode_variant(tag: u32, field: &WireField) -> Result<Self, DecodeError> {
        match tag {
            9 => Ok(Contact::Phone(codec::string().decode(field, "phone")?)),
            10 => Ok(Contact::Postal(
                codec::message::<Address>().decode(field, "postal")?,
            )),
            _ => Ok(Contact::NotSet),
        }
    }

    fn encode_variant(&self, writer: &mut Writer) {
        match self {
            Contact::NotSet => {}
            Contact::Phone(value) => {
                writer.write_tag(9, WireType::Len);
                codec::string().write(value, writer);
            }
            Contact::Postal(value) => {
                writer.write_tag(10, WireType::Len);
                codec::message::<Address>().write(value, writer);
            }
        }
    }

    fn encoded_variant_len(&self) -> usize {
        match self {
            Contact::NotSet => 0,
            Contact::Phone(value) => encoded_key_len(9) + codec::string().encoded_len(value),
            Contact::Postal(value) => {
                encoded_key_len(10) + codec::message::<Address>().encoded_len(value)
            }
        }
    }

    fn variant_tag(&self) -> Option<u32> {
        match self {
            Contact::NotSet => None,
            Contact::Phone(_) => Some(9),
            Contact::Postal(_) => Some(10),
        }
    }

    fn variant_json(&self, options: &JsonOptions) -> Option<(&'static str, Json)> {
        match self {
            Contact::NotSet => None,
            Contact::Phone(value) => Some(("phone", codec::string().to_json(value, options))),
            Contact::Postal(value) => Some((
                "postal",
                codec::message::<Address>().to_json(value, options),
            )),
        }
    }

    fn variant_from_json(
        object: &serde_json::Map<String, Json>,
    ) -> Result<Option<Self>, DecodeError> {
        if let Some(value) = object.get("phone") {
            if !value.is_null() {
                return Ok(Some(Contact::Phone(
                    codec::string().from_json(value, "phone")?,
                )));
            }
        }
        if let Some(value) = object.get("postal") {
            if !value.is_null() {
                return Ok(Some(Contact::Postal(
                    codec::message::<Address>().from_json(value, "postal")?,
                )));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Person {
    pub name: String,
    pub id: i32,
    pub emails: Vec<String>,
    pub scores: Vec<i32>,
    pub attributes: MapField<String, i32>,
    pub address: Option<Address>,
    pub token: u64,
    pub blob: Bytes,
    pub contact: Contact,
    pub verified: Option<bool>,
    pub home_planet: Planet,
}

impl Message for Person {
    const NAME: &'static str = "example.Person";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Person>> = LazyLock::new(|| {
            MessageSpec::builder("example.Person")
                .field(basic(
                    1,
                    "name",
                    "name",
                    codec::string(),
                    |m: &Person| &m.name,
                    |m: &mut Person| &mut m.name,
                ))
                .field(basic(
                    2,
                    "id",
                    "id",
                    codec::int32(),
                    |m: &Person| &m.id,
                    |m: &mut Person| &mut m.id,
                ))
                .field(repeated(
                    3,
                    "emails",
                    "emails",
                    codec::string(),
                    Packing::NotPacked,
                    |m: &Person| &m.emails,
                    |m: &mut Person| &mut m.emails,
                ))
                .field(repeated(
                    4,
                    "scores",
                    "scores",
                    codec::int32(),
                    Packing::Packed,
                    |m: &Person| &m.scores,
                    |m: &mut Person| &mut m.scores,
                ))
                .field(map_field(
                    5,
                    "attributes",
                    "attributes",
                    codec::string(),
                    codec::int32(),
                    |m: &Person| &m.attributes,
                    |m: &mut Person| &mut m.attributes,
                ))
                .field(basic_opt(
                    6,
                    "address",
                    "address",
                    codec::message::<Address>(),
                    |m: &Person| &m.address,
                    |m: &mut Person| &mut m.address,
                ))
                .field(basic(
                    7,
                    "token",
                    "token",
                    codec::uint64(),
                    |m: &Person| &m.token,
                    |m: &mut Person| &mut m.token,
                ))
                .field(basic(
                    8,
                    "blob",
                    "blob",
                    codec::bytes(),
                    |m: &Person| &m.blob,
                    |m: &mut Person| &mut m.blob,
                ))
                .field(oneof(
                    "contact",
                    |m: &Person| &m.contact,
                    |m: &mut Person| &mut m.contact,
                ))
                .field(basic_opt(
                    11,
                    "verified",
                    "verified",
                    codec::boolean(),
                    |m: &Person| &m.verified,
                    |m: &mut Person| &mut m.verified,
                ))
                .field(basic(
                    12,
                    "home_planet",
                    "homePlanet",
                    codec::enumeration::<Planet>(),
                    |m: &Person| &m.home_planet,
                    |m: &mut Person| &mut m.home_planet,
                ))
                .build()
        });
        &SPEC
    }
}

/// Proto2 message with a required field, an explicit default, and an
/// extension range 100-199.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRecord {
    pub id: i32,
    pub label: String,
    pub extensions: ExtensionSet,
}

impl Default for LegacyRecord {
    fn default() -> Self {
        LegacyRecord {
            id: 0,
            label: "unset".to_string(),
            extensions: ExtensionSet::new(),
        }
    }
}

impl Message for LegacyRecord {
    const NAME: &'static str = "example.LegacyRecord";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<LegacyRecord>> = LazyLock::new(|| {
            MessageSpec::builder("example.LegacyRecord")
                .field(basic_req(
                    1,
                    "id",
                    "id",
                    codec::int32(),
                    |m: &LegacyRecord| &m.id,
                    |m: &mut LegacyRecord| &mut m.id,
                ))
                .field(basic_default(
                    2,
                    "label",
                    "label",
                    codec::string(),
                    "unset".to_string(),
                    |m: &LegacyRecord| &m.label,
                    |m: &mut LegacyRecord| &mut m.label,
                ))
                .extensions(
                    vec![100..=199],
                    |m: &LegacyRecord| &m.extensions,
                    |m: &mut LegacyRecord| &mut m.extensions,
                )
                .build()
        });
        &SPEC
    }
}

/// `extend LegacyRecord { optional string nickname = 100; }`
pub static NICKNAME: LazyLock<Extension<String>> =
    LazyLock::new(|| Extension::new(100, "nickname", codec::string()));

/// Recursive message; the child field is boxed to keep the type sized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    pub value: i32,
    pub child: Option<Box<TreeNode>>,
}

impl Message for TreeNode {
    const NAME: &'static str = "example.TreeNode";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<TreeNode>> = LazyLock::new(|| {
            MessageSpec::builder("example.TreeNode")
                .field(basic(
                    1,
                    "value",
                    "value",
                    codec::int32(),
                    |m: &TreeNode| &m.value,
                    |m: &mut TreeNode| &mut m.value,
                ))
                .field(basic_opt(
                    2,
                    "child",
                    "child",
                    codec::message::<TreeNode>().boxed(),
                    |m: &TreeNode| &m.child,
                    |m: &mut TreeNode| &mut m.child,
                ))
                .build()
        });
        &SPEC
    }
}

/// Every scalar type at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scalars {
    pub double_value: f64,
    pub float_value: f32,
    pub int32_value: i32,
    pub int64_value: i64,
    pub uint32_value: u32,
    pub uint64_value: u64,
    pub sint32_value: Sint32,
    pub sint64_value: Sint64,
    pub fixed32_value: Fixed32,
    pub fixed64_value: Fixed64,
    pub sfixed32_value: Sfixed32,
    pub sfixed64_value: Sfixed64,
    pub bool_value: bool,
    pub string_value: String,
    pub bytes_value: Bytes,
}

impl Message for Scalars {
    const NAME: &'static str = "example.Scalars";

    fn spec() -> &'static MessageSpec<Self> {
        static SPEC: LazyLock<MessageSpec<Scalars>> = LazyLock::new(|| {
            MessageSpec::builder("example.Scalars")
                .field(basic(
                    1,
                    "double_value",
                    "doubleValue",
                    codec::double(),
                    |m: &Scalars| &m.double_value,
                    |m: &mut Scalars| &mut m.double_value,
                ))
                .field(basic(
                    2,
                    "float_value",
                    "floatValue",
                    codec::float(),
                    |m: &Scalars| &m.float_value,
                    |m: &mut Scalars| &mut m.float_value,
                ))
                .field(basic(
                    3,
                    "int32_value",
                    "int32Value",
                    codec::int32(),
                    |m: &Scalars| &m.int32_value,
                    |m: &mut Scalars| &mut m.int32_value,
                ))
                .field(basic(
                    4,
                    "int64_value",
                    "int64Value",
                    codec::int64(),
                    |m: &Scalars| &m.int64_value,
                    |m: &mut Scalars| &mut m.int64_value,
                ))
                .field(basic(
                    5,
                    "uint32_value",
                    "uint32Value",
                    codec::uint32(),
                    |m: &Scalars| &m.uint32_value,
                    |m: &mut Scalars| &mut m.uint32_value,
                ))
                .field(basic(
                    6,
                    "uint64_value",
                    "uint64Value",
                    codec::uint64(),
                    |m: &Scalars| &m.uint64_value,
                    |m: &mut Scalars| &mut m.uint64_value,
                ))
                .field(basic(
                    7,
                    "sint32_value",
                    "sint32Value",
                    codec::sint32(),
                    |m: &Scalars| &m.sint32_value,
                    |m: &mut Scalars| &mut m.sint32_value,
                ))
                .field(basic(
                    8,
                    "sint64_value",
                    "sint64Value",
                    codec::sint64(),
                    |m: &Scalars| &m.sint64_value,
                    |m: &mut Scalars| &mut m.sint64_value,
                ))
                .field(basic(
                    9,
                    "fixed32_value",
                    "fixed32Value",
                    codec::fixed32(),
                    |m: &Scalars| &m.fixed32_value,
                    |m: &mut Scalars| &mut m.fixed32_value,
                ))
                .field(basic(
                    10,
                    "fixed64_value",
                    "fixed64Value",
                    codec::fixed64(),
                    |m: &Scalars| &m.fixed64_value,
                    |m: &mut Scalars| &mut m.fixed64_value,
                ))
                .field(basic(
                    11,
                    "sfixed32_value",
                    "sfixed32Value",
                    codec::sfixed32(),
                    |m: &Scalars| &m.sfixed32_value,
                    |m: &mut Scalars| &mut m.sfixed32_value,
                ))
                .field(basic(
                    12,
                    "sfixed64_value",
                    "sfixed64Value",
                    codec::sfixed64(),
                    |m: &Scalars| &m.sfixed64_value,
                    |m: &mut Scalars| &mut m.sfixed64_value,
                ))
                .field(basic(
                    13,
                    "bool_value",
                    "boolValue",
                    codec::boolean(),
                    |m: &Scalars| &m.bool_value,
                    |m: &mut Scalars| &mut m.bool_value,
                ))
                .field(basic(
                    14,
                    "string_value",
                    "stringValue",
                    codec::string(),
                    |m: &Scalars| &m.string_value,
                    |m: &mut Scalars| &mut m.string_value,
                ))
                .field(basic(
                    15,
                    "bytes_value",
                    "bytesValue",
                    codec::bytes(),
                    |m: &Scalars| &m.bytes_value,
                    |m: &mut Scalars| &mut m.bytes_value,
                ))
                .build()
        });
        &SPEC
    }
}

/// `rpc Lookup(Person) returns (Address)` on `example.Directory`.
pub const LOOKUP: ServiceMethod<Person, Address> =
    ServiceMethod::new("example.Directory", "Lookup");
