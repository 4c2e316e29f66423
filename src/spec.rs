//! Declarative field specs: the compound combinators generated code uses
//! to describe a message.
//!
//! A [`MessageSpec`] is an ordered list of [`FieldSpec`]s plus the message's
//! fully qualified name and any declared extension ranges. Each `FieldSpec`
//! is built by one of the combinators in this module (`basic`, `basic_opt`,
//! `repeated`, `map_field`, `oneof`, ...) from a [`Codec`] and a pair of
//! accessors projecting the field out of the record. The decoder, encoder,
//! JSON codec, and merge all walk the same list, so tag numbers, defaults,
//! and scalar-type choices cannot drift between directions.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::codec::Codec;
use crate::decode::Strategy;
use crate::error::DecodeError;
use crate::extensions::ExtensionSet;
use crate::json::JsonOptions;
use crate::leb128::LebCodec;
use crate::oneof::Oneof;
use crate::wire::{encoded_key_len, FieldKind, WireField, WireType};
use crate::writer::Writer;

/// Whether a repeated scalar field uses the packed encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Packing {
    Packed,
    NotPacked,
}

/// How a field binds to the wire and to presence semantics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Label {
    /// Singular field without presence (proto3, or proto2 with a default).
    Singular,
    /// Optional field; absence is distinguishable (`Option` in the record).
    Optional,
    /// Proto2 `required`; decoding fails if absent.
    Required,
    /// Repeated field.
    Repeated { packed: bool },
    /// Map field.
    Map,
    /// Oneof group; covers all member tags.
    Oneof { required: bool },
}

type DecodeFn<M> = Box<dyn Fn(&mut M, u32, &WireField) -> Result<(), DecodeError> + Send + Sync>;
type EncodeFn<M> = Box<dyn Fn(&M, &mut Writer) + Send + Sync>;
type LenFn<M> = Box<dyn Fn(&M) -> usize + Send + Sync>;
type JsonEmitFn<M> = Box<dyn Fn(&M, &JsonOptions, &mut Map<String, Value>) + Send + Sync>;
type JsonAbsorbFn<M> = Box<dyn Fn(&mut M, &Map<String, Value>) -> Result<(), DecodeError> + Send + Sync>;
type MergeFn<M> = Box<dyn Fn(&mut M, &M) + Send + Sync>;

/// The spec for a single field (or oneof group) of message `M`.
pub struct FieldSpec<M> {
    tags: SmallVec<[u32; 2]>,
    name: &'static str,
    json_name: &'static str,
    label: Label,
    decode: DecodeFn<M>,
    encode: EncodeFn<M>,
    encoded_len: LenFn<M>,
    json_emit: JsonEmitFn<M>,
    json_absorb: JsonAbsorbFn<M>,
    merge: MergeFn<M>,
}

impl<M> FieldSpec<M> {
    /// The wire tags this field answers to (one, or all oneof members).
    pub fn tags(&self) -> &[u32] {
        &self.tags
    }

    /// The declared proto field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The camelCase JSON name.
    pub fn json_name(&self) -> &'static str {
        self.json_name
    }

    /// The field's binding.
    pub fn label(&self) -> Label {
        self.label
    }

    pub(crate) fn decode_value(
        &self,
        message: &mut M,
        tag: u32,
        field: &WireField,
    ) -> Result<(), DecodeError> {
        (self.decode)(message, tag, field)
    }

    pub(crate) fn encode_value(&self, message: &M, writer: &mut Writer) {
        (self.encode)(message, writer)
    }

    pub(crate) fn value_len(&self, message: &M) -> usize {
        (self.encoded_len)(message)
    }

    pub(crate) fn emit_json(&self, message: &M, options: &JsonOptions, out: &mut Map<String, Value>) {
        (self.json_emit)(message, options, out)
    }

    pub(crate) fn absorb_json(
        &self,
        message: &mut M,
        object: &Map<String, Value>,
    ) -> Result<(), DecodeError> {
        (self.json_absorb)(message, object)
    }

    pub(crate) fn merge_from(&self, dst: &mut M, src: &M) {
        (self.merge)(dst, src)
    }
}

impl<M> core::fmt::Debug for FieldSpec<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("tags", &self.tags)
            .field("name", &self.name)
            .field("label", &self.label)
            .finish()
    }
}

/// Look up a JSON object entry by JSON name first, then proto name.
fn lookup<'a>(
    object: &'a Map<String, Value>,
    json_name: &str,
    name: &str,
) -> Option<&'a Value> {
    object.get(json_name).or_else(|| object.get(name))
}

fn json_key(options: &JsonOptions, name: &'static str, json_name: &'static str) -> &'static str {
    if options.json_names {
        json_name
    } else {
        name
    }
}

/// Singular proto3 field: zero-default, elided on the wire and (by
/// default) in JSON when at the default.
///
/// Scalars and enums only; message fields carry presence and use
/// [`basic_opt`].
pub fn basic<M, T>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<T>,
    get: fn(&M) -> &T,
    get_mut: fn(&mut M) -> &mut T,
) -> FieldSpec<M>
where
    M: 'static,
    T: Clone + Send + Sync + 'static,
{
    FieldSpec {
        tags: SmallVec::from_slice(&[tag]),
        name,
        json_name,
        label: Label::Singular,
        decode: {
            let codec = codec.clone();
            Box::new(move |message, _tag, field| {
                *get_mut(message) = codec.decode(field, name)?;
                Ok(())
            })
        },
        encode: {
            let codec = codec.clone();
            Box::new(move |message, writer| {
                let value = get(message);
                if !codec.is_default(value) {
                    writer.write_tag(tag, codec.kind().wire_type());
                    codec.write(value, writer);
                }
            })
        },
        encoded_len: {
            let codec = codec.clone();
            Box::new(move |message| {
                let value = get(message);
                if codec.is_default(value) {
                    0
                } else {
                    encoded_key_len(tag) + codec.encoded_len(value)
                }
            })
        },
        json_emit: {
            let codec = codec.clone();
            Box::new(move |message, options, out| {
                let value = get(message);
                if options.omit_default_values && codec.is_default(value) {
                    return;
                }
                out.insert(
                    json_key(options, name, json_name).to_string(),
                    codec.to_json(value, options),
                );
            })
        },
        json_absorb: {
            let codec = codec.clone();
            Box::new(move |message, object| {
                if let Some(value) = lookup(object, json_name, name) {
                    if !value.is_null() {
                        *get_mut(message) = codec.from_json(value, name)?;
                    }
                }
                Ok(())
            })
        },
        merge: Box::new(move |dst, src| {
            let value = get(src);
            if !codec.is_default(value) {
                *get_mut(dst) = value.clone();
            }
        }),
    }
}

/// Singular proto2 field with an explicit default.
///
/// Always emitted on the wire (proto2 fields carry no elision rule here),
/// so merging always overwrites; elided in JSON when equal to the declared
/// default.
pub fn basic_default<M, T>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<T>,
    default: T,
    get: fn(&M) -> &T,
    get_mut: fn(&mut M) -> &mut T,
) -> FieldSpec<M>
where
    M: 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let json_codec = codec.clone();
    let mut spec = basic_default_inner(tag, name, json_name, codec, get, get_mut);
    spec.json_emit = Box::new(move |message, options, out| {
        let value = get(message);
        if options.omit_default_values && *value == default {
            return;
        }
        out.insert(
            json_key(options, name, json_name).to_string(),
            json_codec.to_json(value, options),
        );
    });
    spec
}

/// Proto2 `required` field: always emitted; decoding fails when absent.
pub fn basic_req<M, T>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<T>,
    get: fn(&M) -> &T,
    get_mut: fn(&mut M) -> &mut T,
) -> FieldSpec<M>
where
    M: 'static,
    T: Clone + Send + Sync + 'static,
{
    let mut spec = basic_default_inner(tag, name, json_name, codec, get, get_mut);
    spec.label = Label::Required;
    spec
}

/// Shared shape of `basic_default`/`basic_req` without a JSON elision
/// default.
fn basic_default_inner<M, T>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<T>,
    get: fn(&M) -> &T,
    get_mut: fn(&mut M) -> &mut T,
) -> FieldSpec<M>
where
    M: 'static,
    T: Clone + Send + Sync + 'static,
{
    FieldSpec {
        tags: SmallVec::from_slice(&[tag]),
        name,
        json_name,
        label: Label::Singular,
        decode: {
            let codec = codec.clone();
            Box::new(move |message, _tag, field| {
                *get_mut(message) = codec.decode(field, name)?;
                Ok(())
            })
        },
        encode: {
            let codec = codec.clone();
            Box::new(move |message, writer| {
                writer.write_tag(tag, codec.kind().wire_type());
                codec.write(get(message), writer);
            })
        },
        encoded_len: {
            let codec = codec.clone();
            Box::new(move |message| encoded_key_len(tag) + codec.encoded_len(get(message)))
        },
        json_emit: {
            let codec = codec.clone();
            Box::new(move |message, options, out| {
                out.insert(
                    json_key(options, name, json_name).to_string(),
                    codec.to_json(get(message), options),
                );
            })
        },
        json_absorb: {
            let codec = codec.clone();
            Box::new(move |message, object| {
                if let Some(value) = lookup(object, json_name, name) {
                    if !value.is_null() {
                        *get_mut(message) = codec.from_json(value, name)?;
                    }
                }
                Ok(())
            })
        },
        merge: Box::new(move |dst, src| {
            *get_mut(dst) = get(src).clone();
        }),
    }
}

/// Optional field with explicit presence: `Option<T>` in the record.
///
/// Emitted iff `Some`, including default values. Repeated wire occurrences
/// of a message field merge recursively; scalars overwrite.
pub fn basic_opt<M, T>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<T>,
    get: fn(&M) -> &Option<T>,
    get_mut: fn(&mut M) -> &mut Option<T>,
) -> FieldSpec<M>
where
    M: 'static,
    T: Clone + Send + Sync + 'static,
{
    FieldSpec {
        tags: SmallVec::from_slice(&[tag]),
        name,
        json_name,
        label: Label::Optional,
        decode: {
            let codec = codec.clone();
            Box::new(move |message, _tag, field| {
                let incoming = codec.decode(field, name)?;
                match get_mut(message) {
                    Some(existing) => codec.merge_value(existing, &incoming),
                    slot @ None => *slot = Some(incoming),
                }
                Ok(())
            })
        },
        encode: {
            let codec = codec.clone();
            Box::new(move |message, writer| {
                if let Some(value) = get(message) {
                    writer.write_tag(tag, codec.kind().wire_type());
                    codec.write(value, writer);
                }
            })
        },
        encoded_len: {
            let codec = codec.clone();
            Box::new(move |message| match get(message) {
                Some(value) => encoded_key_len(tag) + codec.encoded_len(value),
                None => 0,
            })
        },
        json_emit: {
            let codec = codec.clone();
            Box::new(move |message, options, out| {
                if let Some(value) = get(message) {
                    out.insert(
                        json_key(options, name, json_name).to_string(),
                        codec.to_json(value, options),
                    );
                }
            })
        },
        json_absorb: {
            let codec = codec.clone();
            Box::new(move |message, object| {
                if let Some(value) = lookup(object, json_name, name) {
                    if !value.is_null() {
                        *get_mut(message) = Some(codec.from_json(value, name)?);
                    }
                }
                Ok(())
            })
        },
        merge: Box::new(move |dst, src| {
            if let Some(incoming) = get(src) {
                match get_mut(dst) {
                    Some(existing) => codec.merge_value(existing, incoming),
                    slot @ None => *slot = Some(incoming.clone()),
                }
            }
        }),
    }
}

/// Repeated field, stored in wire order.
///
/// Packed reception is recognized regardless of the declared packing: a
/// length-delimited payload arriving for a non-length-delimited element
/// kind is re-read as a stream of elements. Mixed packed and unpacked
/// occurrences concatenate.
pub fn repeated<M, E>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    codec: Codec<E>,
    packing: Packing,
    get: fn(&M) -> &Vec<E>,
    get_mut: fn(&mut M) -> &mut Vec<E>,
) -> FieldSpec<M>
where
    M: 'static,
    E: Clone + Send + Sync + 'static,
{
    let packed = packing == Packing::Packed && codec.kind().is_packable();
    FieldSpec {
        tags: SmallVec::from_slice(&[tag]),
        name,
        json_name,
        label: Label::Repeated { packed },
        decode: {
            let codec = codec.clone();
            Box::new(move |message, _tag, field| {
                let elements = get_mut(message);
                match field {
                    WireField::LengthDelimited(data)
                        if codec.kind() != FieldKind::LengthDelimited =>
                    {
                        let mut reader = crate::reader::Reader::new(data.clone());
                        while reader.has_more() {
                            elements.push(codec.read(&mut reader)?);
                        }
                        Ok(())
                    }
                    other => {
                        elements.push(codec.decode(other, name)?);
                        Ok(())
                    }
                }
            })
        },
        encode: {
            let codec = codec.clone();
            Box::new(move |message, writer| {
                let elements = get(message);
                if elements.is_empty() {
                    return;
                }
                if packed {
                    let payload: usize = elements.iter().map(|e| codec.encoded_len(e)).sum();
                    writer.write_tag(tag, WireType::Len);
                    writer.write_varint(payload as u64);
                    for element in elements {
                        codec.write(element, writer);
                    }
                } else {
                    for element in elements {
                        writer.write_tag(tag, codec.kind().wire_type());
                        codec.write(element, writer);
                    }
                }
            })
        },
        encoded_len: {
            let codec = codec.clone();
            Box::new(move |message| {
                let elements = get(message);
                if elements.is_empty() {
                    return 0;
                }
                if packed {
                    let payload: usize = elements.iter().map(|e| codec.encoded_len(e)).sum();
                    encoded_key_len(tag) + (payload as u64).encoded_leb128_len() + payload
                } else {
                    elements
                        .iter()
                        .map(|e| encoded_key_len(tag) + codec.encoded_len(e))
                        .sum()
                }
            })
        },
        json_emit: {
            let codec = codec.clone();
            Box::new(move |message, options, out| {
                let elements = get(message);
                if elements.is_empty() && options.omit_default_values {
                    return;
                }
                let items: Vec<Value> = elements
                    .iter()
                    .map(|e| codec.to_json(e, options))
                    .collect();
                out.insert(
                    json_key(options, name, json_name).to_string(),
                    Value::Array(items),
                );
            })
        },
        json_absorb: {
            let codec = codec.clone();
            Box::new(move |message, object| {
                let Some(value) = lookup(object, json_name, name) else {
                    return Ok(());
                };
                if value.is_null() {
                    return Ok(());
                }
                let items = value
                    .as_array()
                    .ok_or_else(|| DecodeError::illegal_value("expected JSON array", name))?;
                let elements = get_mut(message);
                for item in items {
                    elements.push(codec.from_json(item, name)?);
                }
                Ok(())
            })
        },
        merge: Box::new(move |dst, src| {
            get_mut(dst).extend(get(src).iter().cloned());
        }),
    }
}

/// Map field: `repeated` over a synthetic two-field entry message
/// (`key = 1`, `value = 2`).
pub fn map_field<M, K, V>(
    tag: u32,
    name: &'static str,
    json_name: &'static str,
    key_codec: Codec<K>,
    value_codec: Codec<V>,
    get: fn(&M) -> &crate::map::MapField<K, V>,
    get_mut: fn(&mut M) -> &mut crate::map::MapField<K, V>,
) -> FieldSpec<M>
where
    M: 'static,
    K: Clone + PartialEq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    FieldSpec {
        tags: SmallVec::from_slice(&[tag]),
        name,
        json_name,
        label: Label::Map,
        decode: {
            let key_codec = key_codec.clone();
            let value_codec = value_codec.clone();
            Box::new(move |message, _tag, field| {
                let data = field.expect_len(name)?;
                let mut reader = crate::reader::Reader::new(data.clone());
                let mut key = key_codec.default_value();
                let mut value = value_codec.default_value();
                while reader.has_more() {
                    let (entry_tag, entry_field) = reader.read_field()?;
                    match entry_tag {
                        1 => key = key_codec.decode(&entry_field, name)?,
                        2 => value = value_codec.decode(&entry_field, name)?,
                        // Unknown entry fields are skipped; read_field
                        // already consumed the payload.
                        _ => {}
                    }
                }
                get_mut(message).insert(key, value);
                Ok(())
            })
        },
        encode: {
            let key_codec = key_codec.clone();
            let value_codec = value_codec.clone();
            Box::new(move |message, writer| {
                for (key, value) in get(message).iter() {
                    let entry_len = map_entry_len(&key_codec, &value_codec, key, value);
                    writer.write_tag(tag, WireType::Len);
                    writer.write_varint(entry_len as u64);
                    if !key_codec.is_default(key) {
                        writer.write_tag(1, key_codec.kind().wire_type());
                        key_codec.write(key, writer);
                    }
                    if !value_codec.is_default(value) {
                        writer.write_tag(2, value_codec.kind().wire_type());
                        value_codec.write(value, writer);
                    }
                }
            })
        },
        encoded_len: {
            let key_codec = key_codec.clone();
            let value_codec = value_codec.clone();
            Box::new(move |message| {
                get(message)
                    .iter()
                    .map(|(key, value)| {
                        let entry_len = map_entry_len(&key_codec, &value_codec, key, value);
                        encoded_key_len(tag) + (entry_len as u64).encoded_leb128_len() + entry_len
                    })
                    .sum()
            })
        },
        json_emit: {
            let key_codec = key_codec.clone();
            let value_codec = value_codec.clone();
            Box::new(move |message, options, out| {
                let entries = get(message);
                if entries.is_empty() && options.omit_default_values {
                    return;
                }
                let mut object = Map::new();
                for (key, value) in entries.iter() {
                    object.insert(
                        map_key_string(key_codec.to_json(key, options)),
                        value_codec.to_json(value, options),
                    );
                }
                out.insert(
                    json_key(options, name, json_name).to_string(),
                    Value::Object(object),
                );
            })
        },
        json_absorb: {
            let key_codec = key_codec.clone();
            let value_codec = value_codec.clone();
            Box::new(move |message, object| {
                let Some(value) = lookup(object, json_name, name) else {
                    return Ok(());
                };
                if value.is_null() {
                    return Ok(());
                }
                let entries = value
                    .as_object()
                    .ok_or_else(|| DecodeError::illegal_value("expected JSON object", name))?;
                let map = get_mut(message);
                for (key_text, item) in entries {
                    let key = key_codec.from_json(&Value::String(key_text.clone()), name)?;
                    let item = value_codec.from_json(item, name)?;
                    map.insert(key, item);
                }
                Ok(())
            })
        },
        merge: Box::new(move |dst, src| {
            let map = get_mut(dst);
            for (key, value) in get(src).iter() {
                map.insert(key.clone(), value.clone());
            }
        }),
    }
}

fn map_entry_len<K: 'static, V: 'static>(
    key_codec: &Codec<K>,
    value_codec: &Codec<V>,
    key: &K,
    value: &V,
) -> usize {
    let mut len = 0;
    if !key_codec.is_default(key) {
        len += encoded_key_len(1) + key_codec.encoded_len(key);
    }
    if !value_codec.is_default(value) {
        len += encoded_key_len(2) + value_codec.encoded_len(value);
    }
    len
}

/// Render a map key's JSON form as the object-key string.
///
/// Protobuf map keys are integral, bool, or string; all of them render as
/// JSON strings when used as object keys.
fn map_key_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Oneof group: one [`FieldSpec`] covering every member tag, last-wins.
pub fn oneof<M, O>(
    name: &'static str,
    get: fn(&M) -> &O,
    get_mut: fn(&mut M) -> &mut O,
) -> FieldSpec<M>
where
    M: 'static,
    O: Oneof,
{
    oneof_inner(name, false, get, get_mut)
}

/// Oneof group whose absence after decoding is an error (`OneofMissing`).
pub fn oneof_req<M, O>(
    name: &'static str,
    get: fn(&M) -> &O,
    get_mut: fn(&mut M) -> &mut O,
) -> FieldSpec<M>
where
    M: 'static,
    O: Oneof,
{
    oneof_inner(name, true, get, get_mut)
}

fn oneof_inner<M, O>(
    name: &'static str,
    required: bool,
    get: fn(&M) -> &O,
    get_mut: fn(&mut M) -> &mut O,
) -> FieldSpec<M>
where
    M: 'static,
    O: Oneof,
{
    FieldSpec {
        tags: SmallVec::from_slice(O::TAGS),
        name,
        json_name: name,
        label: Label::Oneof { required },
        decode: Box::new(move |message, tag, field| {
            *get_mut(message) = O::decode_variant(tag, field)?;
            Ok(())
        }),
        encode: Box::new(move |message, writer| {
            get(message).encode_variant(writer);
        }),
        encoded_len: Box::new(move |message| get(message).encoded_variant_len()),
        json_emit: Box::new(move |message, options, out| {
            if let Some((key, value)) = get(message).variant_json(options) {
                out.insert(key.to_string(), value);
            }
        }),
        json_absorb: Box::new(move |message, object| {
            if let Some(variant) = O::variant_from_json(object)? {
                *get_mut(message) = variant;
            }
            Ok(())
        }),
        merge: Box::new(move |dst, src| {
            let incoming = get(src);
            if incoming.is_set() {
                *get_mut(dst) = incoming.clone();
            }
        }),
    }
}

/// Tags below this bound use a flat dispatch array; larger specs fall back
/// to a tree.
const ARRAY_DISPATCH_LIMIT: u32 = 1024;

/// Hard cap for [`Strategy::Fast`], so forcing the array on a spec with a
/// huge max tag cannot allocate unbounded memory.
const FAST_ARRAY_CAP: u32 = 1 << 16;

const NO_FIELD: u32 = u32::MAX;

#[derive(Debug)]
pub(crate) enum DispatchTable {
    Array(Vec<u32>),
    Tree(BTreeMap<u32, u32>),
}

impl DispatchTable {
    fn build_array<M>(fields: &[FieldSpec<M>], max_tag: u32) -> DispatchTable {
        let mut table = vec![NO_FIELD; max_tag as usize + 1];
        for (index, field) in fields.iter().enumerate() {
            for &tag in field.tags() {
                table[tag as usize] = index as u32;
            }
        }
        DispatchTable::Array(table)
    }

    fn build_tree<M>(fields: &[FieldSpec<M>]) -> DispatchTable {
        let mut table = BTreeMap::new();
        for (index, field) in fields.iter().enumerate() {
            for &tag in field.tags() {
                table.insert(tag, index as u32);
            }
        }
        DispatchTable::Tree(table)
    }

    #[inline]
    pub(crate) fn lookup(&self, tag: u32) -> Option<usize> {
        match self {
            DispatchTable::Array(table) => match table.get(tag as usize) {
                Some(&index) if index != NO_FIELD => Some(index as usize),
                _ => None,
            },
            DispatchTable::Tree(table) => table.get(&tag).map(|&index| index as usize),
        }
    }
}

pub(crate) enum DispatchRef<'a> {
    Borrowed(&'a DispatchTable),
    Owned(DispatchTable),
}

impl DispatchRef<'_> {
    #[inline]
    pub(crate) fn lookup(&self, tag: u32) -> Option<usize> {
        match self {
            DispatchRef::Borrowed(table) => table.lookup(tag),
            DispatchRef::Owned(table) => table.lookup(tag),
        }
    }
}

pub(crate) struct ExtensionsDecl<M> {
    ranges: Vec<RangeInclusive<u32>>,
    get: fn(&M) -> &ExtensionSet,
    get_mut: fn(&mut M) -> &mut ExtensionSet,
}

impl<M> ExtensionsDecl<M> {
    pub(crate) fn contains(&self, tag: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&tag))
    }

    pub(crate) fn get<'a>(&self, message: &'a M) -> &'a ExtensionSet {
        (self.get)(message)
    }

    pub(crate) fn get_mut<'a>(&self, message: &'a mut M) -> &'a mut ExtensionSet {
        (self.get_mut)(message)
    }
}

/// The complete spec for a message type `M`.
pub struct MessageSpec<M> {
    name: &'static str,
    fields: Vec<FieldSpec<M>>,
    max_tag: u32,
    dispatch: DispatchTable,
    extensions: Option<ExtensionsDecl<M>>,
}

impl<M> MessageSpec<M> {
    /// Start building a spec for the message with the given fully
    /// qualified name.
    pub fn builder(name: &'static str) -> MessageSpecBuilder<M> {
        MessageSpecBuilder {
            name,
            fields: Vec::new(),
            extensions: None,
        }
    }

    /// The message's fully qualified name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field specs, in declaration order.
    pub fn fields(&self) -> &[FieldSpec<M>] {
        &self.fields
    }

    pub(crate) fn extensions_decl(&self) -> Option<&ExtensionsDecl<M>> {
        self.extensions.as_ref()
    }

    /// The dispatch table for a decode pass under the given strategy.
    pub(crate) fn dispatch_for(&self, strategy: Strategy) -> DispatchRef<'_> {
        match strategy {
            Strategy::Standard => DispatchRef::Borrowed(&self.dispatch),
            Strategy::Fast => match &self.dispatch {
                table @ DispatchTable::Array(_) => DispatchRef::Borrowed(table),
                DispatchTable::Tree(_) if self.max_tag < FAST_ARRAY_CAP => {
                    DispatchRef::Owned(DispatchTable::build_array(&self.fields, self.max_tag))
                }
                table @ DispatchTable::Tree(_) => DispatchRef::Borrowed(table),
            },
            Strategy::Full => match &self.dispatch {
                table @ DispatchTable::Tree(_) => DispatchRef::Borrowed(table),
                DispatchTable::Array(_) => {
                    DispatchRef::Owned(DispatchTable::build_tree(&self.fields))
                }
            },
        }
    }
}

impl<M> core::fmt::Debug for MessageSpec<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageSpec")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for [`MessageSpec`].
pub struct MessageSpecBuilder<M> {
    name: &'static str,
    fields: Vec<FieldSpec<M>>,
    extensions: Option<ExtensionsDecl<M>>,
}

impl<M> MessageSpecBuilder<M> {
    /// Append a field spec. Spec order is wire and JSON emission order.
    pub fn field(mut self, field: FieldSpec<M>) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare extension ranges and the accessors for the message's
    /// extension sideband.
    pub fn extensions(
        mut self,
        ranges: Vec<RangeInclusive<u32>>,
        get: fn(&M) -> &ExtensionSet,
        get_mut: fn(&mut M) -> &mut ExtensionSet,
    ) -> Self {
        self.extensions = Some(ExtensionsDecl {
            ranges,
            get,
            get_mut,
        });
        self
    }

    /// Finalize the spec, building the standard dispatch table.
    pub fn build(self) -> MessageSpec<M> {
        let max_tag = self
            .fields
            .iter()
            .flat_map(|f| f.tags().iter().copied())
            .max()
            .unwrap_or(0);
        let dispatch = if max_tag < ARRAY_DISPATCH_LIMIT {
            DispatchTable::build_array(&self.fields, max_tag)
        } else {
            DispatchTable::build_tree(&self.fields)
        };
        MessageSpec {
            name: self.name,
            fields: self.fields,
            max_tag,
            dispatch,
            extensions: self.extensions,
        }
    }
}
