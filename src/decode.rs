//! Spec-driven binary deserializer.

use smallvec::SmallVec;

use crate::error::DecodeError;
use crate::message::Message;
use crate::reader::Reader;
use crate::spec::Label;

/// Tag-dispatch strategy for a decode pass.
///
/// Threaded explicitly through the decode entry points rather than held in
/// process-wide state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Flat array when the spec's max tag is small, tree otherwise.
    #[default]
    Standard,
    /// Force the flat array (within an allocation cap).
    Fast,
    /// Force the tree.
    Full,
}

/// Decode a message with the [`Strategy::Standard`] dispatch.
pub fn from_reader<M: Message>(reader: &mut Reader) -> Result<M, DecodeError> {
    from_reader_with(Strategy::Standard, reader)
}

/// Decode a message, consuming the reader to exhaustion.
///
/// Fields stream in wire order into a fresh `M::default()` record:
/// singular fields and oneofs are last-wins, repeated fields append (with
/// packed runs expanded), maps collapse duplicate keys last-wins. Unknown
/// tags inside the message's declared extension ranges are captured into
/// its extension set; all other unknown tags are consumed and dropped.
/// After streaming, `required` fields and required oneofs that never
/// appeared fail the decode.
pub fn from_reader_with<M: Message>(
    strategy: Strategy,
    reader: &mut Reader,
) -> Result<M, DecodeError> {
    let spec = M::spec();
    let dispatch = spec.dispatch_for(strategy);
    let mut message = M::default();
    let mut seen: SmallVec<[bool; 16]> = SmallVec::from_elem(false, spec.fields().len());

    while reader.has_more() {
        let (tag, field) = reader.read_field()?;
        match dispatch.lookup(tag) {
            Some(index) => {
                spec.fields()[index].decode_value(&mut message, tag, &field)?;
                seen[index] = true;
            }
            None => {
                if let Some(ext) = spec.extensions_decl() {
                    if ext.contains(tag) {
                        ext.get_mut(&mut message).push(tag, field);
                    }
                }
                // Unknown tags outside extension ranges were already
                // consumed by read_field; nothing to do.
            }
        }
    }

    for (index, field_spec) in spec.fields().iter().enumerate() {
        match field_spec.label() {
            Label::Required if !seen[index] => {
                return Err(DecodeError::required_field_missing(
                    field_spec.tags()[0],
                    field_spec.name(),
                ));
            }
            Label::Oneof { required: true } if !seen[index] => {
                return Err(DecodeError::oneof_missing(field_spec.name()));
            }
            _ => {}
        }
    }

    Ok(message)
}
