//! LEB128 variable-length integer encoding/decoding.

use crate::error::DecodeError;

/// Integers that can round-trip through the LEB128 encoding.
///
/// Protobuf varints are base-128 little-endian: each byte carries 7 bits of
/// payload and the high bit marks continuation. A `u64` spans at most 10
/// bytes, a `u32` at most 5.
pub trait LebCodec: Sized + Copy {
    /// Maximum number of bytes a value of this type can occupy.
    const MAX_LEB_BYTES: usize;

    /// Decode a LEB128 integer from the front of `data`.
    ///
    /// Returns the decoded value and the number of bytes consumed. Fails
    /// with `Truncated` if the slice ends mid-varint and `VarintOverflow`
    /// if the encoding carries more bits than `Self` can hold.
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError>;

    /// Encode `self` into the provided buffer, returning the number of
    /// bytes written.
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize;

    /// The number of bytes `self` occupies when LEB128 encoded.
    fn encoded_leb128_len(self) -> usize;
}

impl LebCodec for u64 {
    const MAX_LEB_BYTES: usize = 10;

    #[inline]
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut value = 0u64;
        for i in 0..Self::MAX_LEB_BYTES {
            let Some(&byte) = data.get(i) else {
                return Err(DecodeError::truncated());
            };
            if i == 9 {
                // Final byte: only one payload bit left in a u64.
                if byte > 0x01 {
                    return Err(DecodeError::varint_overflow());
                }
                value |= u64::from(byte) << 63;
                return Ok((value, 10));
            }
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte < 0x80 {
                return Ok((value, i + 1));
            }
        }
        unreachable!("loop covers all {} bytes", Self::MAX_LEB_BYTES)
    }

    #[inline]
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize {
        let mut value = self;
        let mut written = 0;
        loop {
            written += 1;
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                buf.put_u8(byte);
                return written;
            }
            buf.put_u8(byte | 0x80);
        }
    }

    /// 7 payload bits per byte, minimum one byte for zero.
    #[inline]
    fn encoded_leb128_len(self) -> usize {
        let bits = 64 - self.leading_zeros() as usize;
        bits.max(1).div_ceil(7)
    }
}

impl LebCodec for u32 {
    const MAX_LEB_BYTES: usize = 5;

    #[inline]
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut value = 0u32;
        for i in 0..Self::MAX_LEB_BYTES {
            let Some(&byte) = data.get(i) else {
                return Err(DecodeError::truncated());
            };
            if i == 4 {
                // Final byte: four payload bits left in a u32.
                if byte > 0x0f {
                    return Err(DecodeError::varint_overflow());
                }
                value |= u32::from(byte) << 28;
                return Ok((value, 5));
            }
            value |= u32::from(byte & 0x7f) << (7 * i);
            if byte < 0x80 {
                return Ok((value, i + 1));
            }
        }
        unreachable!("loop covers all {} bytes", Self::MAX_LEB_BYTES)
    }

    #[inline]
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize {
        let mut value = self;
        let mut written = 0;
        loop {
            written += 1;
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                buf.put_u8(byte);
                return written;
            }
            buf.put_u8(byte | 0x80);
        }
    }

    #[inline]
    fn encoded_leb128_len(self) -> usize {
        let bits = 32 - self.leading_zeros() as usize;
        bits.max(1).div_ceil(7)
    }
}
