//! Spec-driven binary serializer.
//!
//! Encoding walks the message's spec in declaration order and is total: a
//! well-typed message always serializes. Sub-message lengths are computed
//! up front through the spec's length ops, so the writer never needs to
//! patch bytes it has already emitted.

use crate::message::Message;
use crate::wire::encoded_key_len;
use crate::writer::Writer;

/// Append all of `message`'s fields, then its extensions in preserved
/// order.
pub fn write_fields<M: Message>(message: &M, writer: &mut Writer) {
    let spec = M::spec();
    for field_spec in spec.fields() {
        field_spec.encode_value(message, writer);
    }
    if let Some(ext) = spec.extensions_decl() {
        for (tag, field) in ext.get(message).iter() {
            writer.write_tag(*tag, field.wire_type());
            field.write_payload(writer);
        }
    }
}

/// Number of bytes [`write_fields`] emits for `message`.
pub fn encoded_len<M: Message>(message: &M) -> usize {
    let spec = M::spec();
    let mut len = 0;
    for field_spec in spec.fields() {
        len += field_spec.value_len(message);
    }
    if let Some(ext) = spec.extensions_decl() {
        for (tag, field) in ext.get(message).iter() {
            len += encoded_key_len(*tag) + field.payload_len();
        }
    }
    len
}
