//! Bounds-checked cursor over an in-memory byte buffer.
//!
//! Every metadata parser in this crate reads through a [`Cursor`]. The cursor
//! checks each requested range against the buffer before touching it, and a
//! failed read leaves the position exactly where it was, so repeated failures
//! are idempotent.
//!
//! # Byte Order
//!
//! Endianness is a property of the cursor, not of the process. TIFF data
//! declares it in the header (`II` or `MM`); JPEG framing and IPTC are always
//! big-endian.

use crate::error::ReadError;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Decode an unsigned integer of up to 8 bytes.
    ///
    /// Widths 1, 2, 4 and 8 take the fast path; other widths are folded
    /// byte by byte, keeping the low 64 bits.
    #[inline]
    pub fn read_uint(self, bytes: &[u8]) -> u64 {
        match (self, bytes.len()) {
            (_, 1) => bytes[0] as u64,
            (ByteOrder::LittleEndian, 2) => u16::from_le_bytes([bytes[0], bytes[1]]) as u64,
            (ByteOrder::BigEndian, 2) => u16::from_be_bytes([bytes[0], bytes[1]]) as u64,
            (ByteOrder::LittleEndian, 4) => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64
            }
            (ByteOrder::BigEndian, 4) => {
                u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64
            }
            (ByteOrder::LittleEndian, 8) => u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
            (ByteOrder::BigEndian, 8) => u64::from_be_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
            (ByteOrder::LittleEndian, _) => bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64),
            (ByteOrder::BigEndian, _) => bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
        }
    }

    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        self.read_uint(&bytes[..2]) as u16
    }

    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        self.read_uint(&bytes[..4]) as u32
    }

    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        self.read_uint(&bytes[..8])
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Read cursor over a borrowed byte buffer.
///
/// The position only moves forward through successful reads or explicit
/// [`seek`](Cursor::seek) calls; it never exceeds `data.len()`.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            order,
        }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The whole underlying buffer.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    fn truncated(&self, offset: u64, requested: u64) -> ReadError {
        ReadError::TruncatedData {
            offset,
            requested,
            available: self.data.len() as u64,
        }
    }

    /// Move to an absolute offset. Seeking to `len()` is allowed.
    pub fn seek(&mut self, offset: u64) -> Result<(), ReadError> {
        match usize::try_from(offset) {
            Ok(pos) if pos <= self.data.len() => {
                self.pos = pos;
                Ok(())
            }
            _ => Err(self.truncated(offset, 0)),
        }
    }

    /// Skip `n` bytes.
    pub fn skip(&mut self, n: u64) -> Result<(), ReadError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn read_bytes(&mut self, n: u64) -> Result<&'a [u8], ReadError> {
        let bytes = self.peek_bytes(n)?;
        self.pos += bytes.len();
        Ok(bytes)
    }

    /// Borrow the next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: u64) -> Result<&'a [u8], ReadError> {
        let len = usize::try_from(n).map_err(|_| self.truncated(self.pos as u64, n))?;
        if len > self.remaining() {
            return Err(self.truncated(self.pos as u64, n));
        }
        Ok(&self.data[self.pos..self.pos + len])
    }

    /// Borrow `len` bytes at an absolute offset without moving the cursor.
    pub fn slice_at(&self, offset: u64, len: u64) -> Result<&'a [u8], ReadError> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| self.truncated(offset, len))?;
        if end > self.data.len() as u64 {
            return Err(self.truncated(offset, len));
        }
        Ok(&self.data[offset as usize..end as usize])
    }

    /// Read an unsigned integer of `width` bytes (at most 8).
    pub fn read_fixed(&mut self, width: usize) -> Result<u64, ReadError> {
        let bytes = self.read_bytes(width as u64)?;
        Ok(self.order.read_uint(bytes))
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.read_fixed(1).map(|v| v as u8)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        self.read_fixed(2).map(|v| v as u16)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        self.read_fixed(4).map(|v| v as u32)
    }
}

// =============================================================================
// Tests
// =============================================================================
