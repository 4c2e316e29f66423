//! Append-only encode buffer with selectable allocation profiles.

use bytes::Bytes;

use crate::leb128::LebCodec;
use crate::wire::WireType;

/// Chunk size reserved up front by [`WriterMode::Speed`].
const SPEED_CHUNK: usize = 4096;

/// Allocation strategy for a [`Writer`].
///
/// The emitted bytes are identical across modes; only the memory and CPU
/// profiles differ.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WriterMode {
    /// Pre-allocate large chunks, trading memory for fewer reallocations.
    Speed,
    /// Reserve exactly what each write needs.
    Space,
    /// Amortized growth.
    #[default]
    Balanced,
}

/// Append-only byte buffer implementing the wire-format write primitives.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
    mode: WriterMode,
}

impl Writer {
    /// Create a writer in [`WriterMode::Balanced`].
    pub fn new() -> Self {
        Writer::with_mode(WriterMode::Balanced)
    }

    /// Create a writer with the given allocation mode.
    pub fn with_mode(mode: WriterMode) -> Self {
        let buf = match mode {
            WriterMode::Speed => Vec::with_capacity(SPEED_CHUNK),
            WriterMode::Space | WriterMode::Balanced => Vec::new(),
        };
        Writer { buf, mode }
    }

    /// The mode this writer was created with.
    pub fn mode(&self) -> WriterMode {
        self.mode
    }

    #[inline]
    fn reserve(&mut self, additional: usize) {
        match self.mode {
            WriterMode::Speed => {
                if self.buf.capacity() - self.buf.len() < additional {
                    self.buf.reserve(additional.max(SPEED_CHUNK));
                }
            }
            WriterMode::Space => self.buf.reserve_exact(additional),
            WriterMode::Balanced => self.buf.reserve(additional),
        }
    }

    /// Append a base-128 varint.
    #[inline]
    pub fn write_varint(&mut self, value: u64) {
        self.reserve(u64::MAX_LEB_BYTES);
        value.encode_leb128(&mut self.buf);
    }

    /// Append a little-endian 32-bit value.
    #[inline]
    pub fn write_fixed32(&mut self, value: u32) {
        self.reserve(4);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian 64-bit value.
    #[inline]
    pub fn write_fixed64(&mut self, value: u64) {
        self.reserve(8);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a varint length prefix followed by `data`.
    pub fn write_length_delimited(&mut self, data: &[u8]) {
        self.write_varint(data.len() as u64);
        self.write_raw(data);
    }

    /// Append raw bytes with no length prefix.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.reserve(data.len());
        self.buf.extend_from_slice(data);
    }

    /// Append a field key combining `tag` and `wire_type`.
    #[inline]
    pub fn write_tag(&mut self, tag: u32, wire_type: WireType) {
        let key = (tag << 3) | u32::from(wire_type.into_val());
        self.reserve(u32::MAX_LEB_BYTES);
        key.encode_leb128(&mut self.buf);
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the accumulated bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finalize into a contiguous byte string, transferring ownership.
    pub fn contents(self) -> Bytes {
        Bytes::from(self.buf)
    }
}
