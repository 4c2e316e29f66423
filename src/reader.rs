//! Decode cursor over an encoded message buffer.

use bytes::Bytes;

use crate::error::DecodeError;
use crate::leb128::LebCodec;
use crate::wire::{WireField, WireType, MAXIMUM_TAG_VAL, MINIMUM_TAG_VAL};

/// A cursor over a byte buffer implementing the wire-format read
/// primitives.
///
/// The reader holds a [`Bytes`] handle, so length-delimited payloads come
/// back as zero-copy slices of the original buffer. Decoded messages copy
/// their scalar contents out, so they stay valid after the reader is
/// dropped.
#[derive(Debug, Clone)]
pub struct Reader {
    buf: Bytes,
    pos: usize,
}

impl Reader {
    /// Create a reader over the given buffer.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Reader {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Create a reader over a copy of the given slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Reader::new(Bytes::copy_from_slice(data))
    }

    /// True while there are unread bytes left.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Current cursor offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute offset.
    pub fn reset(&mut self, offset: usize) {
        self.pos = offset.min(self.buf.len());
    }

    /// Decode a base-128 varint, at most 10 bytes.
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let (value, read) = u64::decode_leb128(&self.buf[self.pos..])?;
        self.pos += read;
        Ok(value)
    }

    /// Read a little-endian 32-bit value.
    #[inline]
    pub fn read_fixed32(&mut self) -> Result<u32, DecodeError> {
        let end = self.pos + 4;
        if end > self.buf.len() {
            return Err(DecodeError::truncated());
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(u32::from_le_bytes(raw))
    }

    /// Read a little-endian 64-bit value.
    #[inline]
    pub fn read_fixed64(&mut self) -> Result<u64, DecodeError> {
        let end = self.pos + 8;
        if end > self.buf.len() {
            return Err(DecodeError::truncated());
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(u64::from_le_bytes(raw))
    }

    /// Read a varint length prefix and return that many bytes as a
    /// zero-copy slice.
    pub fn read_length_delimited(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::length_overflow(len))?;
        if self.remaining() < len {
            return Err(DecodeError::truncated());
        }
        let data = self.buf.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(data)
    }

    /// Read one complete field: the key, then the payload according to the
    /// key's wire type.
    ///
    /// Group wire types (3 and 4) are rejected as unsupported.
    pub fn read_field(&mut self) -> Result<(u32, WireField), DecodeError> {
        let key = self.read_varint()?;
        if key > u64::from(u32::MAX) {
            return Err(DecodeError::invalid_key(key));
        }
        let wire_type = WireType::try_from_val((key & 0b111) as u8)?;
        let tag = (key >> 3) as u32;
        if !(MINIMUM_TAG_VAL..=MAXIMUM_TAG_VAL).contains(&tag) {
            return Err(DecodeError::invalid_key(key));
        }

        let field = match wire_type {
            WireType::Varint => WireField::Varint(self.read_varint()?),
            WireType::I64 => WireField::Fixed64(self.read_fixed64()?),
            WireType::I32 => WireField::Fixed32(self.read_fixed32()?),
            WireType::Len => WireField::LengthDelimited(self.read_length_delimited()?),
            WireType::SGroup | WireType::EGroup => {
                return Err(DecodeError::not_implemented("group wire types"));
            }
        };
        Ok((tag, field))
    }

    /// Drain the remaining buffer into a list of `(tag, field)` pairs.
    ///
    /// Debugging aid; decoders stream with [`Reader::read_field`] instead.
    pub fn to_list(&mut self) -> Result<Vec<(u32, WireField)>, DecodeError> {
        let mut fields = Vec::new();
        while self.has_more() {
            fields.push(self.read_field()?);
        }
        Ok(fields)
    }
}

impl From<Bytes> for Reader {
    fn from(buf: Bytes) -> Self {
        Reader::new(buf)
    }
}

impl From<Vec<u8>> for Reader {
    fn from(buf: Vec<u8>) -> Self {
        Reader::new(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    #[test]
    fn test_read_varint() {
        let mut reader = Reader::from_slice(&[0x96, 0x01, 0x00]);
        assert_eq!(reader.read_varint().unwrap(), 150);
        assert_eq!(reader.read_varint().unwrap(), 0);
        assert!(!reader.has_more());
    }

    #[test]
    fn test_read_fixed() {
        let mut reader = Reader::from_slice(&[1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(reader.read_fixed32().unwrap(), 1);
        assert_eq!(reader.read_fixed64().unwrap(), 2);

        let mut reader = Reader::from_slice(&[1, 2, 3]);
        let err = reader.read_fixed32().unwrap_err();
        assert_eq!(*err.kind(), DecodeErrorKind::Truncated);
    }

    #[test]
    fn test_read_length_delimited() {
        let mut reader = Reader::from_slice(&[3, b'a', b'b', b'c', 0]);
        let data = reader.read_length_delimited().unwrap();
        assert_eq!(&data[..], b"abc");
        assert_eq!(reader.position(), 4);

        // Truncated payload.
        let mut reader = Reader::from_slice(&[5, b'a']);
        let err = reader.read_length_delimited().unwrap_err();
        assert_eq!(*err.kind(), DecodeErrorKind::Truncated);
    }

    #[test]
    fn test_read_field() {
        // Field 1, varint 150: key 0x08.
        let mut reader = Reader::from_slice(&[0x08, 0x96, 0x01]);
        let (tag, field) = reader.read_field().unwrap();
        assert_eq!(tag, 1);
        assert_eq!(field, WireField::Varint(150));
    }

    #[test]
    fn test_read_field_rejects_groups() {
        // Field 1, wire type 3 (SGroup).
        let mut reader = Reader::from_slice(&[0x0b]);
        let err = reader.read_field().unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::NotImplemented { .. }
        ));
    }

    #[test]
    fn test_read_field_rejects_tag_zero() {
        // Key 0x02 has tag 0, wire type 2.
        let mut reader = Reader::from_slice(&[0x02, 0x00]);
        let err = reader.read_field().unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidKey { .. }));
    }

    #[test]
    fn test_reset_and_to_list() {
        let mut reader = Reader::from_slice(&[0x08, 0x01, 0x10, 0x02]);
        let fields = reader.to_list().unwrap();
        assert_eq!(
            fields,
            vec![(1, WireField::Varint(1)), (2, WireField::Varint(2))]
        );

        reader.reset(0);
        assert!(reader.has_more());
        let (tag, _) = reader.read_field().unwrap();
        assert_eq!(tag, 1);
    }
}
