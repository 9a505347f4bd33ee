//! Decoded metadata records.
//!
//! A [`TagRecord`] is the immutable result of decoding one raw entry and
//! resolving it through the tag registry. Records are identified by a
//! [`TagKey`] rendered as `Family.Group.Name`, for example
//! `Exif.GPSInfo.GPSLatitude`.

mod print;
mod value;

use std::fmt;

pub use print::Printer;
pub use value::{Rational, TypeId, Value};

/// Binary values longer than this are not printed unless asked for.
pub const BINARY_DISPLAY_LIMIT: usize = 128;

// =============================================================================
// Family
// =============================================================================

/// Top-level metadata family. Each family is decoded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Exif,
    Iptc,
    Xmp,
}

impl Family {
    pub const fn name(self) -> &'static str {
        match self {
            Family::Exif => "Exif",
            Family::Iptc => "Iptc",
            Family::Xmp => "Xmp",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// TagKey
// =============================================================================

/// Composite key of a record. Case is preserved exactly as registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagKey {
    family: Family,
    group: String,
    name: String,
    rendered: String,
}

impl TagKey {
    pub fn new(family: Family, group: impl Into<String>, name: impl Into<String>) -> Self {
        let group = group.into();
        let name = name.into();
        let rendered = format!("{}.{}.{}", family.name(), group, name);
        Self {
            family,
            group,
            name,
            rendered,
        }
    }

    #[inline]
    pub fn family(&self) -> Family {
        self.family
    }

    #[inline]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full key text, the string selectors match against.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

// =============================================================================
// TagRecord
// =============================================================================

/// One decoded metadata field.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRecord {
    key: TagKey,
    tag: u16,
    type_id: TypeId,
    count: u64,
    value: Value,
    printer: Printer,
}

impl TagRecord {
    pub fn new(
        key: TagKey,
        tag: u16,
        type_id: TypeId,
        count: u64,
        value: Value,
        printer: Printer,
    ) -> Self {
        Self {
            key,
            tag,
            type_id,
            count,
            value,
            printer,
        }
    }

    #[inline]
    pub fn key(&self) -> &TagKey {
        &self.key
    }

    /// Numeric tag id (IPTC: dataset number, XMP: always 0).
    #[inline]
    pub fn tag(&self) -> u16 {
        self.tag
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Element count as stored in the file.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Human-readable value.
    ///
    /// Large binary values are replaced by a placeholder unless
    /// `show_binary` is set.
    pub fn display_value(&self, show_binary: bool) -> String {
        if !show_binary && self.type_id.is_binary() && self.value.len() > BINARY_DISPLAY_LIMIT {
            return "(Binary value suppressed)".to_string();
        }
        self.printer.render(&self.value)
    }
}

// =============================================================================
// Tests
// =============================================================================
