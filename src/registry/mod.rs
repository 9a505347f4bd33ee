//! Static tag registry.
//!
//! Maps `(family, group, numeric id)` to a display name, the type the
//! standard declares for the tag, and the [`Printer`] used to interpret its
//! value. The tables are plain `static` slices; an index over them is built
//! lazily on first lookup and never mutated afterwards.
//!
//! Unknown ids are not an error. [`tag_name`] synthesizes a `0x%04x` name so
//! vendor tags still show up in reports.

mod exif;
mod iptc;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::metadata::{Family, Printer, TypeId};

pub use exif::{EXIF_IFD_POINTER, GPS_IFD_POINTER, IOP_IFD_POINTER};

// =============================================================================
// TagInfo
// =============================================================================

/// Registry entry for one known tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub id: u16,
    pub name: &'static str,
    pub type_id: TypeId,
    pub printer: Printer,
}

impl TagInfo {
    pub(crate) const fn new(id: u16, name: &'static str, type_id: TypeId, printer: Printer) -> Self {
        Self {
            id,
            name,
            type_id,
            printer,
        }
    }
}

// =============================================================================
// Groups
// =============================================================================

/// Exif group names, one per directory kind.
pub mod groups {
    pub const IMAGE: &str = "Image";
    pub const PHOTO: &str = "Photo";
    pub const GPS: &str = "GPSInfo";
    pub const IOP: &str = "Iop";
    pub const THUMBNAIL: &str = "Thumbnail";

    pub const ENVELOPE: &str = "Envelope";
    pub const APPLICATION2: &str = "Application2";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Table {
    Image,
    Photo,
    Gps,
    Iop,
    Envelope,
    Application2,
}

impl Table {
    fn resolve(family: Family, group: &str) -> Option<Self> {
        match (family, group) {
            // IFD1 carries the same vocabulary as IFD0
            (Family::Exif, groups::IMAGE | groups::THUMBNAIL) => Some(Table::Image),
            (Family::Exif, groups::PHOTO) => Some(Table::Photo),
            (Family::Exif, groups::GPS) => Some(Table::Gps),
            (Family::Exif, groups::IOP) => Some(Table::Iop),
            (Family::Iptc, groups::ENVELOPE) => Some(Table::Envelope),
            (Family::Iptc, groups::APPLICATION2) => Some(Table::Application2),
            _ => None,
        }
    }

    fn entries(self) -> &'static [TagInfo] {
        match self {
            Table::Image => exif::IMAGE_TAGS,
            Table::Photo => exif::PHOTO_TAGS,
            Table::Gps => exif::GPS_TAGS,
            Table::Iop => exif::IOP_TAGS,
            Table::Envelope => iptc::ENVELOPE_TAGS,
            Table::Application2 => iptc::APPLICATION2_TAGS,
        }
    }

    const ALL: [Table; 6] = [
        Table::Image,
        Table::Photo,
        Table::Gps,
        Table::Iop,
        Table::Envelope,
        Table::Application2,
    ];
}

static INDEX: LazyLock<HashMap<(Table, u16), &'static TagInfo>> = LazyLock::new(|| {
    Table::ALL
        .iter()
        .flat_map(|&table| table.entries().iter().map(move |info| ((table, info.id), info)))
        .collect()
});

// =============================================================================
// Lookup
// =============================================================================

/// Look up a known tag.
pub fn lookup(family: Family, group: &str, id: u16) -> Option<&'static TagInfo> {
    let table = Table::resolve(family, group)?;
    INDEX.get(&(table, id)).copied()
}

/// Display name of a tag, synthesized as `0x%04x` when unknown.
pub fn tag_name(family: Family, group: &str, id: u16) -> Cow<'static, str> {
    match lookup(family, group, id) {
        Some(info) => Cow::Borrowed(info.name),
        None => Cow::Owned(format!("0x{id:04x}")),
    }
}

/// Group name of an IPTC record number.
pub fn iptc_record_name(record: u8) -> Cow<'static, str> {
    match record {
        1 => Cow::Borrowed(groups::ENVELOPE),
        2 => Cow::Borrowed(groups::APPLICATION2),
        other => Cow::Owned(format!("0x{other:04x}")),
    }
}

// =============================================================================
// Tests
// =============================================================================
