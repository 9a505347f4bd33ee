//! TIFF header parsing.
//!
//! Exif data is a TIFF structure: an 8 byte header followed by image file
//! directories. The same header starts raw TIFF files and the payload of a
//! JPEG `Exif\0\0` APP1 segment.
//!
//! # Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! BigTIFF (version 43) never carries Exif metadata and is rejected.

use crate::error::DecodeError;
use crate::io::ByteOrder;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Version number for BigTIFF
const VERSION_BIGTIFF: u16 = 43;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry: 2 tag + 2 type + 4 count + 4 value/offset
pub const IFD_ENTRY_SIZE: u64 = 12;

/// Bytes available for an inline value in an IFD entry
pub const INLINE_VALUE_SIZE: u64 = 4;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the structure
    pub byte_order: ByteOrder,

    /// Offset of IFD0, relative to the start of the header
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `bytes`.
    ///
    /// # Errors
    /// Returns `CorruptedMetadata` when the buffer is too small, the magic or
    /// version is wrong, or IFD0 lies outside the buffer. Callers decoding a
    /// raw TIFF file turn this into a framing error.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(DecodeError::corrupted(format!(
                "TIFF header needs {} bytes, got {}",
                TIFF_HEADER_SIZE,
                bytes.len()
            )));
        }

        // Checked as raw byte patterns, independent of endianness
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => {
                return Err(DecodeError::corrupted(format!(
                    "invalid TIFF byte order mark 0x{magic:04X}"
                )))
            }
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        match version {
            VERSION_TIFF => {}
            VERSION_BIGTIFF => {
                return Err(DecodeError::corrupted("BigTIFF is not supported"));
            }
            _ => {
                return Err(DecodeError::corrupted(format!(
                    "invalid TIFF version {version}"
                )))
            }
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]) as u64;
        if first_ifd_offset >= bytes.len() as u64 {
            return Err(DecodeError::corrupted(format!(
                "IFD0 offset {first_ifd_offset} outside {} byte TIFF block",
                bytes.len()
            )));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

/// Check whether `bytes` begins with a classic TIFF signature.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x49, 0x49, 0x2A, 0x00]) | Some([0x4D, 0x4D, 0x00, 0x2A])
    )
}

// =============================================================================
// Tests
// =============================================================================
