//! Oneof field support.
//!
//! Protobuf oneofs have no wire representation of their own: each member is
//! encoded as a regular field with its own tag, and mutual exclusivity is a
//! decode-time rule. Generated code models a oneof as a closed Rust enum
//! with one variant per member plus a `NotSet` sentinel, which is also the
//! `Default`.
//!
//! When multiple members of the same oneof appear on the wire, the last one
//! wins.

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::json::JsonOptions;
use crate::wire::WireField;
use crate::writer::Writer;

/// A generated oneof enum.
pub trait Oneof:
    Clone + PartialEq + core::fmt::Debug + Default + Send + Sync + Sized + 'static
{
    /// The member tags of this oneof, in declaration order.
    const TAGS: &'static [u32];

    /// Decode the member with the given tag from a wire payload.
    ///
    /// Only called with tags from [`Oneof::TAGS`].
    fn decode_variant(tag: u32, field: &WireField) -> Result<Self, DecodeError>;

    /// Encode the active member, key included. No-op for `NotSet`.
    fn encode_variant(&self, writer: &mut Writer);

    /// Number of bytes [`Oneof::encode_variant`] emits.
    fn encoded_variant_len(&self) -> usize;

    /// The tag of the active member, or `None` for `NotSet`.
    fn variant_tag(&self) -> Option<u32>;

    /// The active member as a JSON object entry, or `None` for `NotSet`.
    ///
    /// The key respects `options.json_names`.
    fn variant_json(&self, options: &JsonOptions) -> Option<(&'static str, Value)>;

    /// Scan a JSON object for any member key (JSON name first, then proto
    /// name) and decode it.
    fn variant_from_json(object: &Map<String, Value>) -> Result<Option<Self>, DecodeError>;

    /// True if a member is set.
    fn is_set(&self) -> bool {
        self.variant_tag().is_some()
    }

    /// Fail with `OneofMissing` when no member is set.
    fn require(self, field: &'static str) -> Result<Self, DecodeError> {
        if self.is_set() {
            Ok(self)
        } else {
            Err(DecodeError::oneof_missing(field))
        }
    }
}
