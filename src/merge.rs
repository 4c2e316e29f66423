//! Spec-driven message merging.
//!
//! `merge(a, b)` combines two values of the same message type with
//! protobuf's field-wise rules: scalars and enums take `b`'s value when it
//! is set (approximated for proto3 by "not the default"), sub-messages
//! merge recursively, repeated fields concatenate, map entries overwrite
//! by key, and a set oneof in `b` replaces `a`'s variant entirely.
//! Extensions append.
//!
//! The result is the same message you would get by decoding the
//! concatenation of the two wire encodings.

use crate::message::Message;

/// Merge `b` into a copy of `a`.
pub fn merge<M: Message>(a: &M, b: &M) -> M {
    let mut merged = a.clone();
    merge_into(&mut merged, b);
    merged
}

/// Merge `src` into `dst` in place.
pub fn merge_into<M: Message>(dst: &mut M, src: &M) {
    let spec = M::spec();
    for field_spec in spec.fields() {
        field_spec.merge_from(dst, src);
    }
    if let Some(ext) = spec.extensions_decl() {
        let incoming: Vec<_> = ext.get(src).iter().cloned().collect();
        let entries = ext.get_mut(dst);
        for (tag, field) in incoming {
            entries.push(tag, field);
        }
    }
}
