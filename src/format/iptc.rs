//! IPTC-IIM decoding.
//!
//! In JPEG files IPTC travels inside Photoshop image resource blocks:
//!
//! ```text
//! "8BIM" | id: u16 | name: pascal string, padded to even | size: u32 | data, padded to even
//! ```
//!
//! Resource 0x0404 holds the IIM stream, a sequence of datasets:
//!
//! ```text
//! 0x1C | record: u8 | dataset: u8 | length: u16 | data
//! ```
//!
//! A length with the high bit set is an extended length: the low 15 bits give
//! the number of bytes (at most 4) of the real length that follows.

use tracing::debug;

use crate::error::{DecodeError, ReadError};
use crate::io::{ByteOrder, Cursor};
use crate::metadata::{Family, Printer, TagKey, TagRecord, TypeId, Value};
use crate::registry;

/// Image resource block signature
const IRB_SIGNATURE: &[u8] = b"8BIM";

/// Resource id of the IPTC-NAA record
const IPTC_RESOURCE_ID: u16 = 0x0404;

/// Dataset tag marker
const DATASET_MARKER: u8 = 0x1C;

fn corrupted(e: ReadError) -> DecodeError {
    DecodeError::corrupted(format!("IPTC: {e}"))
}

// =============================================================================
// Photoshop resources
// =============================================================================

/// Find the IPTC-NAA resource in Photoshop image resource data.
///
/// Returns `Ok(None)` when the resources hold no IPTC block.
pub fn locate_iptc(resources: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    let mut cursor = Cursor::new(resources, ByteOrder::BigEndian);

    while cursor.remaining() > 0 {
        let offset = cursor.position();
        let signature = cursor.read_bytes(4).map_err(corrupted)?;
        if signature != IRB_SIGNATURE {
            return Err(DecodeError::corrupted(format!(
                "invalid image resource signature at offset {offset}"
            )));
        }

        let id = cursor.read_u16().map_err(corrupted)?;

        // Pascal string, length byte included, padded to an even size
        let name_len = cursor.read_u8().map_err(corrupted)? as u64;
        cursor.skip(name_len + (name_len + 1) % 2).map_err(corrupted)?;

        let size = cursor.read_u32().map_err(corrupted)? as u64;
        let data = cursor.read_bytes(size).map_err(corrupted)?;

        debug!(id = format!("0x{id:04X}"), offset, size, "Image resource block");

        if id == IPTC_RESOURCE_ID {
            return Ok(Some(data));
        }

        // The final block may omit its padding byte
        if size % 2 == 1 && cursor.remaining() > 0 {
            cursor.skip(1).map_err(corrupted)?;
        }
    }

    Ok(None)
}

// =============================================================================
// IIM datasets
// =============================================================================

/// Decode an IIM dataset stream into records, in stream order.
///
/// # Errors
/// Returns `CorruptedMetadata` when a dataset header or its data is truncated
/// or an extended length is malformed.
pub fn decode_iim(data: &[u8]) -> Result<Vec<TagRecord>, DecodeError> {
    let mut cursor = Cursor::new(data, ByteOrder::BigEndian);
    let mut records = Vec::new();

    while cursor.remaining() > 0 {
        if cursor.read_u8().map_err(corrupted)? != DATASET_MARKER {
            // Padding or trailing junk after the last dataset
            break;
        }

        let record = cursor.read_u8().map_err(corrupted)?;
        let dataset = cursor.read_u8().map_err(corrupted)?;
        let length = read_length(&mut cursor)?;
        let bytes = cursor.read_bytes(length).map_err(corrupted)?;

        records.push(to_record(record, dataset, bytes));
    }

    Ok(records)
}

/// Decode the IPTC family from Photoshop resource data.
pub fn decode_photoshop(resources: &[u8]) -> Result<Vec<TagRecord>, DecodeError> {
    match locate_iptc(resources)? {
        Some(iim) => decode_iim(iim),
        None => Ok(Vec::new()),
    }
}

fn read_length(cursor: &mut Cursor<'_>) -> Result<u64, DecodeError> {
    let length = cursor.read_u16().map_err(corrupted)?;
    if length & 0x8000 == 0 {
        return Ok(length as u64);
    }

    let width = (length & 0x7FFF) as usize;
    if width == 0 || width > 4 {
        return Err(DecodeError::corrupted(format!(
            "IPTC extended length of {width} bytes"
        )));
    }
    cursor.read_fixed(width).map_err(corrupted)
}

fn to_record(record: u8, dataset: u8, bytes: &[u8]) -> TagRecord {
    let group = registry::iptc_record_name(record);
    let id = dataset as u16;
    let info = registry::lookup(Family::Iptc, &group, id);

    let type_id = info.map_or(TypeId::Undefined, |info| info.type_id);
    let printer = info.map_or(Printer::None, |info| info.printer);
    let name = registry::tag_name(Family::Iptc, &group, id);

    let value = match type_id {
        TypeId::String | TypeId::Date | TypeId::Time => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
        TypeId::Short if bytes.len() == 2 => {
            Value::Unsigned(vec![ByteOrder::BigEndian.read_u16(bytes) as u32])
        }
        _ => Value::Bytes(bytes.to_vec()),
    };

    TagRecord::new(
        TagKey::new(Family::Iptc, group, name),
        id,
        type_id,
        bytes.len() as u64,
        value,
        printer,
    )
}

// =============================================================================
// Tests
// =============================================================================
