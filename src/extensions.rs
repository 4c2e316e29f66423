//! Proto2 extension storage and accessors.
//!
//! A message with declared extension ranges carries an [`ExtensionSet`]
//! sideband: the `(tag, payload)` pairs captured during decode, preserved
//! verbatim and re-emitted after the regular fields on encode. Each
//! extension field declared at generation time gets an [`Extension`]
//! descriptor whose accessors decode lazily out of the set.

use crate::codec::Codec;
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::{FieldKind, WireField};
use crate::writer::Writer;

/// The extension sideband of a message: an ordered list of raw wire
/// fields.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ExtensionSet {
    entries: Vec<(u32, WireField)>,
}

impl ExtensionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ExtensionSet {
            entries: Vec::new(),
        }
    }

    /// Append an entry, preserving wire order. Duplicate tags are kept;
    /// accessors read the last occurrence.
    pub fn push(&mut self, tag: u32, field: WireField) {
        self.entries.push((tag, field));
    }

    /// Iterate entries in preserved order.
    pub fn iter(&self) -> core::slice::Iter<'_, (u32, WireField)> {
        self.entries.iter()
    }

    /// The last captured payload for `tag`, if any.
    pub fn get_last(&self, tag: u32) -> Option<&WireField> {
        self.entries
            .iter()
            .rev()
            .find(|(t, _)| *t == tag)
            .map(|(_, f)| f)
    }

    /// Drop every entry with the given tag.
    pub fn clear_tag(&mut self, tag: u32) {
        self.entries.retain(|(t, _)| *t != tag);
    }

    /// Number of captured entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A declared extension field: tag, name, and value codec.
#[derive(Debug, Clone)]
pub struct Extension<T> {
    tag: u32,
    name: &'static str,
    codec: Codec<T>,
}

impl<T: 'static> Extension<T> {
    /// Declare an extension with the given tag and codec.
    pub fn new(tag: u32, name: &'static str, codec: Codec<T>) -> Self {
        Extension { tag, name, codec }
    }

    /// The extension's tag.
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// The extension's declared name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decode the extension out of the set, if present.
    ///
    /// Scans for the last occurrence of the tag and decodes it with the
    /// extension's codec.
    pub fn get(&self, set: &ExtensionSet) -> Result<Option<T>, DecodeError> {
        match set.get_last(self.tag) {
            Some(field) => self.codec.decode(field, self.name).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`Extension::get`], falling back to the type's default when
    /// absent.
    pub fn get_or_default(&self, set: &ExtensionSet) -> Result<T, DecodeError> {
        Ok(match self.get(set)? {
            Some(value) => value,
            None => self.codec.default_value(),
        })
    }

    /// Set the extension, replacing any existing occurrences.
    pub fn set(&self, set: &mut ExtensionSet, value: &T) {
        set.clear_tag(self.tag);
        set.push(self.tag, self.to_wire_field(value));
    }

    /// Remove the extension from the set.
    pub fn clear(&self, set: &mut ExtensionSet) {
        set.clear_tag(self.tag);
    }

    /// Render a value into the raw wire-field form the set stores.
    fn to_wire_field(&self, value: &T) -> WireField {
        let mut writer = Writer::new();
        self.codec.write(value, &mut writer);
        let mut reader = Reader::new(writer.contents());
        // The writer output is a single well-formed payload of the codec's
        // kind, so these reads cannot fail.
        match self.codec.kind() {
            FieldKind::Varint => WireField::Varint(reader.read_varint().unwrap_or(0)),
            FieldKind::Fixed32 => WireField::Fixed32(reader.read_fixed32().unwrap_or(0)),
            FieldKind::Fixed64 => WireField::Fixed64(reader.read_fixed64().unwrap_or(0)),
            FieldKind::LengthDelimited => {
                WireField::LengthDelimited(reader.read_length_delimited().unwrap_or_default())
            }
        }
    }
}
