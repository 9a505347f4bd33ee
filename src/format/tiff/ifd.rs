//! Image file directory walking.
//!
//! Exif metadata is a small tree of IFDs: IFD0 points to the Exif and GPS
//! sub-IFDs, the Exif sub-IFD points to the Interoperability IFD, and IFD0's
//! "next IFD" link leads to IFD1 (the thumbnail).
//!
//! The tree comes from untrusted bytes, so the walk is driven by an explicit
//! work stack instead of recursion. Each job carries its depth, and every
//! decoded directory's byte range is remembered: a pointer back into bytes
//! that were already decoded is a cycle and aborts the walk.
//!
//! # Output Order
//!
//! Entries of a directory in stored order, then its sub-directories in the
//! order their pointers appear, then the next IFD.

use std::collections::BTreeMap;
use std::ops::Range;

use tracing::debug;

use crate::error::{DecodeError, ReadError};
use crate::io::Cursor;
use crate::metadata::{Family, Printer, TagKey, TagRecord, TypeId};
use crate::registry::{self, groups, EXIF_IFD_POINTER, GPS_IFD_POINTER, IOP_IFD_POINTER};

use super::parser::{TiffHeader, IFD_ENTRY_SIZE, INLINE_VALUE_SIZE};
use super::values::decode_value;

/// Default limit on directory nesting.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

// =============================================================================
// DirectoryEntry
// =============================================================================

/// Where an entry's value bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLocation {
    /// Stored in the entry's 4 byte value field
    Inline { bytes: [u8; 4], len: u8 },
    /// Stored elsewhere in the TIFF block
    Offset { offset: u64, len: u64 },
}

/// One raw 12 byte IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub group: &'static str,
    pub tag: u16,
    pub type_code: u16,
    /// Field type, known for every parsed entry
    pub type_id: TypeId,
    pub count: u32,
    pub location: ValueLocation,
}

impl DirectoryEntry {
    /// Parse an entry from its 12 bytes.
    ///
    /// Returns `Ok(None)` for entries with an unknown field type; their size
    /// cannot be known so they are skipped.
    fn parse(raw: &[u8], group: &'static str, cursor: &Cursor<'_>) -> Result<Option<Self>, DecodeError> {
        let order = cursor.byte_order();
        let tag = order.read_u16(&raw[0..2]);
        let type_code = order.read_u16(&raw[2..4]);
        let count = order.read_u32(&raw[4..8]);

        let Some(type_id) = TypeId::from_tiff_code(type_code) else {
            debug!(group, tag, type_code, "skipping entry with unknown type");
            return Ok(None);
        };

        let len = (count as u64).checked_mul(type_id.element_size()).ok_or_else(|| {
            DecodeError::corrupted(format!("{group} entry 0x{tag:04x}: count {count} overflows"))
        })?;

        let location = if len <= INLINE_VALUE_SIZE {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&raw[8..12]);
            ValueLocation::Inline {
                bytes,
                len: len as u8,
            }
        } else {
            let offset = order.read_u32(&raw[8..12]) as u64;
            // Validated before any allocation sized by `len`
            cursor.slice_at(offset, len).map_err(|e| {
                DecodeError::corrupted(format!("{group} entry 0x{tag:04x}: {e}"))
            })?;
            ValueLocation::Offset { offset, len }
        };

        Ok(Some(DirectoryEntry {
            group,
            tag,
            type_code,
            type_id,
            count,
            location,
        }))
    }

    /// Resolve this entry into a record using the registry.
    fn to_record(&self, cursor: &Cursor<'_>) -> Result<TagRecord, DecodeError> {
        let type_id = self.type_id;
        let value = match &self.location {
            ValueLocation::Inline { bytes, len } => {
                decode_value(type_id, &bytes[..*len as usize], cursor.byte_order())
            }
            ValueLocation::Offset { offset, len } => {
                let bytes = cursor.slice_at(*offset, *len).map_err(|e| {
                    DecodeError::corrupted(format!("{} entry 0x{:04x}: {e}", self.group, self.tag))
                })?;
                decode_value(type_id, bytes, cursor.byte_order())
            }
        };

        let info = registry::lookup(Family::Exif, self.group, self.tag);
        let name = registry::tag_name(Family::Exif, self.group, self.tag);
        let printer = info.map(|i| i.printer).unwrap_or(Printer::None);

        Ok(TagRecord::new(
            TagKey::new(Family::Exif, self.group, name),
            self.tag,
            type_id,
            self.count as u64,
            value,
            printer,
        ))
    }

    /// Target offset when this entry points to a sub-directory of `group`.
    fn sub_directory(&self, record: &TagRecord) -> Option<(&'static str, u64)> {
        let child = match (self.group, self.tag) {
            (groups::IMAGE, EXIF_IFD_POINTER) => groups::PHOTO,
            (groups::IMAGE, GPS_IFD_POINTER) => groups::GPS,
            (groups::PHOTO, IOP_IFD_POINTER) => groups::IOP,
            _ => return None,
        };
        let offset = record.value().unsigned_at(0)?;
        (offset != 0).then_some((child, offset as u64))
    }
}

// =============================================================================
// Directory walk
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Job {
    offset: u64,
    group: &'static str,
    depth: u32,
}

/// Walks the IFD tree of one TIFF block.
pub struct DirectoryWalker<'a> {
    cursor: Cursor<'a>,
    max_depth: u32,
    /// Byte ranges of decoded directories, start to end. Never overlapping.
    visited: BTreeMap<u64, u64>,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(tiff: &'a [u8], header: &TiffHeader, max_depth: u32) -> Self {
        Self {
            cursor: Cursor::new(tiff, header.byte_order),
            max_depth,
            visited: BTreeMap::new(),
        }
    }

    /// Decode every reachable directory starting at `first_ifd`.
    pub fn walk(mut self, first_ifd: u64) -> Result<Vec<TagRecord>, DecodeError> {
        let mut records = Vec::new();
        let mut stack = vec![Job {
            offset: first_ifd,
            group: groups::IMAGE,
            depth: 0,
        }];

        while let Some(job) = stack.pop() {
            if job.depth >= self.max_depth {
                return Err(DecodeError::corrupted(format!(
                    "{} directory nested deeper than {}",
                    job.group, self.max_depth
                )));
            }

            let (entries, next) = self.read_directory(job)?;
            debug!(group = job.group, offset = job.offset, entries = entries.len(), "decoded directory");

            let mut children = Vec::new();
            for entry in &entries {
                let record = entry.to_record(&self.cursor)?;
                if let Some((group, offset)) = entry.sub_directory(&record) {
                    children.push(Job {
                        offset,
                        group,
                        depth: job.depth + 1,
                    });
                }
                records.push(record);
            }

            if job.group == groups::IMAGE && next != 0 {
                children.push(Job {
                    offset: next,
                    group: groups::THUMBNAIL,
                    depth: job.depth + 1,
                });
            } else if next != 0 {
                debug!(group = job.group, next, "ignoring next IFD link");
            }

            // Reversed so the first child is decoded next
            stack.extend(children.into_iter().rev());
        }

        Ok(records)
    }

    /// Read the entry table of one directory and its next-IFD link.
    fn read_directory(&mut self, job: Job) -> Result<(Vec<DirectoryEntry>, u64), DecodeError> {
        let corrupt = |e: ReadError| {
            DecodeError::corrupted(format!("{} directory at offset {}: {e}", job.group, job.offset))
        };

        let mut cursor = self.cursor.clone();
        cursor.seek(job.offset).map_err(corrupt)?;
        let count = cursor.read_u16().map_err(corrupt)?;

        // `count` is at most 65535, so this cannot overflow
        let table_len = count as u64 * IFD_ENTRY_SIZE;
        let table = cursor.read_bytes(table_len).map_err(corrupt)?;

        // A missing next-IFD link is tolerated
        let next = cursor.read_u32().map(|n| n as u64).unwrap_or(0);

        let range = job.offset..cursor.position() as u64;
        if self.overlaps_visited(&range) {
            return Err(DecodeError::corrupted(format!(
                "{} directory at offset {} overlaps an already decoded directory",
                job.group, job.offset
            )));
        }
        self.visited.insert(range.start, range.end);

        let mut entries = Vec::with_capacity(count as usize);
        for raw in table.chunks_exact(IFD_ENTRY_SIZE as usize) {
            if let Some(entry) = DirectoryEntry::parse(raw, job.group, &self.cursor)? {
                entries.push(entry);
            }
        }

        Ok((entries, next))
    }
}

impl DirectoryWalker<'_> {
    /// Visited ranges are disjoint, so only the one starting last before
    /// `range.end` can overlap.
    fn overlaps_visited(&self, range: &Range<u64>) -> bool {
        self.visited
            .range(..range.end)
            .next_back()
            .is_some_and(|(_, &end)| end > range.start)
    }
}

/// Decode all Exif records of a TIFF block.
pub fn decode_tiff(tiff: &[u8], max_depth: u32) -> Result<Vec<TagRecord>, DecodeError> {
    let header = TiffHeader::parse(tiff)?;
    DirectoryWalker::new(tiff, &header, max_depth).walk(header.first_ifd_offset)
}

// =============================================================================
// Tests
// =============================================================================
