//! JPEG segment scanning.
//!
//! JPEG files (and Exiv2 `.exv` sidecars, which reuse the same segment
//! syntax) carry metadata in application segments before the first scan:
//!
//! - **APP1 `Exif\0\0`**: a TIFF structure with the Exif directories
//! - **APP1 `http://ns.adobe.com/xap/1.0/\0`**: an XMP packet
//! - **APP13 `Photoshop 3.0\0`**: Photoshop image resources holding IPTC;
//!   large resource blocks are split across several APP13 segments
//!
//! Each segment is `FF xx` followed by a big-endian length that counts itself.
//! Scanning stops at SOS or EOI; anything after is entropy-coded image data.

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::error::{DecodeError, ReadError};
use crate::io::{ByteOrder, Cursor};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker byte
const EOI: u8 = 0xD9;

/// Start Of Scan marker byte
const SOS: u8 = 0xDA;

/// Temporary marker byte (no length field)
const TEM: u8 = 0x01;

/// Application segment 1 (Exif, XMP) marker byte
const APP1: u8 = 0xE1;

/// Application segment 13 (Photoshop) marker byte
const APP13: u8 = 0xED;

const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";
const XMP_SIGNATURE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const PHOTOSHOP_SIGNATURE: &[u8] = b"Photoshop 3.0\0";

// =============================================================================
// Segment scanning
// =============================================================================

/// Metadata payloads found in a JPEG stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JpegSegments<'a> {
    /// TIFF block of the first Exif APP1 segment
    pub exif: Option<&'a [u8]>,
    /// Packet of the first XMP APP1 segment
    pub xmp: Option<&'a [u8]>,
    /// Concatenated Photoshop resource data of all APP13 segments
    pub photoshop: Option<Bytes>,
}

/// Scan segments starting at `start` (just past the file signature).
///
/// # Errors
/// Returns `FailedToReadImageData` when the segment framing is broken: a
/// byte where a marker must be, a length below 2, or a segment running past
/// the end of the data.
pub fn scan_segments(data: &[u8], start: usize) -> Result<JpegSegments<'_>, DecodeError> {
    let framing = |e: ReadError| DecodeError::framing(format!("JPEG segment: {e}"));

    let mut cursor = Cursor::new(data, ByteOrder::BigEndian);
    cursor.seek(start as u64).map_err(framing)?;

    let mut segments = JpegSegments::default();
    let mut photoshop: Option<BytesMut> = None;

    while cursor.remaining() > 0 {
        let offset = cursor.position();
        let lead = cursor.read_u8().map_err(framing)?;
        if lead != 0xFF {
            return Err(DecodeError::framing(format!(
                "expected JPEG marker at offset {offset}, found 0x{lead:02X}"
            )));
        }

        // Any number of 0xFF fill bytes may precede the marker code
        let mut marker = cursor.read_u8().map_err(framing)?;
        while marker == 0xFF {
            marker = cursor.read_u8().map_err(framing)?;
        }

        match marker {
            SOS | EOI => break,
            TEM | 0xD0..=0xD8 => continue,
            _ => {}
        }

        let length = cursor.read_u16().map_err(framing)?;
        if length < 2 {
            return Err(DecodeError::framing(format!(
                "segment 0x{marker:02X} at offset {offset} has invalid length {length}"
            )));
        }
        let payload = cursor.read_bytes(length as u64 - 2).map_err(framing)?;
        debug!(marker = format!("0x{marker:02X}"), offset, length, "JPEG segment");

        match marker {
            APP1 if payload.starts_with(EXIF_SIGNATURE) => {
                segments.exif.get_or_insert(&payload[EXIF_SIGNATURE.len()..]);
            }
            APP1 if payload.starts_with(XMP_SIGNATURE) => {
                segments.xmp.get_or_insert(&payload[XMP_SIGNATURE.len()..]);
            }
            APP13 if payload.starts_with(PHOTOSHOP_SIGNATURE) => {
                photoshop
                    .get_or_insert_with(BytesMut::new)
                    .extend_from_slice(&payload[PHOTOSHOP_SIGNATURE.len()..]);
            }
            _ => {}
        }
    }

    segments.photoshop = photoshop.map(BytesMut::freeze);
    Ok(segments)
}

// =============================================================================
// Tests
// =============================================================================
