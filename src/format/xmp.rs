//! XMP packet decoding.
//!
//! XMP is RDF/XML. Only the subset that carries metadata properties is
//! understood: properties of `rdf:Description` elements, either as
//! attributes or as child elements, and `rdf:Bag`/`rdf:Seq`/`rdf:Alt`
//! arrays of `rdf:li` items. Struct fields, written as a nested description
//! or with `rdf:parseType="Resource"`, follow their parent as
//! `Xmp.exif.Flash/exif:Mode` (or `Xmp.xmpMM.History[1]/stEvt:action` for
//! fields of an array item).
//!
//! Elements are tokenized with a regex and tracked on an explicit stack, so
//! deeply nested input cannot exhaust the call stack.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::DecodeError;
use crate::metadata::{Family, Printer, TagKey, TagRecord, TypeId, Value};

/// Start or end tag of a namespaced element: `</?prefix:name attrs /?>`
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(/?)([A-Za-z_][\w.-]*:[\w.-]+)((?:\s+[\w.:-]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#,
    )
    .expect("XMP tag regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w.:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("XMP attribute regex is valid")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("XML entity regex is valid")
});

/// Namespace prefixes that belong to the packet syntax, not to properties
const SYNTAX_PREFIXES: [&str; 4] = ["rdf", "xmlns", "x", "xml"];

const DESCRIPTION: &str = "rdf:Description";
const LIST_ITEM: &str = "rdf:li";
const DEFAULT_LANGUAGE: &str = "x-default";

// =============================================================================
// Decoding
// =============================================================================

/// Decode the properties of an XMP packet in document order.
///
/// # Errors
/// Returns `CorruptedMetadata` when the packet has no `x:xmpmeta` or
/// `rdf:RDF` element, or when its elements are not properly nested.
pub fn decode_xmp(packet: &[u8]) -> Result<Vec<TagRecord>, DecodeError> {
    let text = String::from_utf8_lossy(packet);
    if !text.contains("<x:xmpmeta") && !text.contains("<rdf:RDF") {
        return Err(DecodeError::corrupted(
            "XMP packet has no x:xmpmeta or rdf:RDF element",
        ));
    }

    let mut parser = PacketParser::default();
    let mut last = 0;

    for caps in TAG.captures_iter(&text) {
        let Some(tag) = caps.get(0) else { continue };
        parser.characters(&text[last..tag.start()]);
        last = tag.end();

        let name = &caps[2];
        if !caps[1].is_empty() {
            parser.close(name)?;
            continue;
        }

        parser.open(name, &caps[3]);
        if !caps[4].is_empty() {
            parser.close(name)?;
        }
    }

    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayKind {
    Bag,
    Seq,
    Alt,
}

impl ArrayKind {
    fn from_element(name: &str) -> Option<Self> {
        match name {
            "rdf:Bag" => Some(ArrayKind::Bag),
            "rdf:Seq" => Some(ArrayKind::Seq),
            "rdf:Alt" => Some(ArrayKind::Alt),
            _ => None,
        }
    }
}

/// `rdf:li` item being collected.
#[derive(Debug, Default)]
struct Item {
    lang: String,
    text: String,
    /// Child property elements are fields of this item
    is_struct: bool,
}

/// Property element being collected.
#[derive(Debug)]
struct Property {
    /// Qualified path, `exif:Flash` or `exif:Flash/exif:Mode`
    path: String,
    /// Stack height at which the property element was opened
    depth: usize,
    /// Record position reserved when the element opened
    slot: usize,
    kind: Option<ArrayKind>,
    /// Child property elements are fields of this property
    is_struct: bool,
    text: String,
    items: Vec<(String, String)>,
    item: Option<Item>,
}

/// Open properties nest: a struct field is collected on top of its parent.
/// Each property reserves its record slot when it opens, so a parent always
/// precedes its fields in the output.
#[derive(Debug, Default)]
struct PacketParser {
    open: Vec<String>,
    properties: Vec<Property>,
    records: Vec<Option<TagRecord>>,
}

impl PacketParser {
    fn open(&mut self, name: &str, attrs: &str) {
        let depth = self.open.len();

        if name == DESCRIPTION {
            let prefix = self.begin_struct();
            for (attr, value) in attributes(attrs) {
                if is_property(attr) {
                    let path = format!("{prefix}{attr}");
                    self.records.push(Some(text_record(&path, value)));
                }
            }
        } else if let Some(kind) = ArrayKind::from_element(name) {
            if let Some(property) = self.properties.last_mut().filter(|p| depth == p.depth + 1) {
                property.kind = Some(kind);
            }
        } else if name == LIST_ITEM {
            if let Some(property) = self
                .properties
                .last_mut()
                .filter(|p| p.kind.is_some() && depth == p.depth + 2)
            {
                let lang = attributes(attrs)
                    .find(|(attr, _)| *attr == "xml:lang")
                    .map_or_else(String::new, |(_, value)| value.to_string());
                property.item = Some(Item {
                    lang,
                    text: String::new(),
                    is_struct: is_resource_struct(attrs),
                });
            }
        } else if is_property(name) && self.accepts_property() {
            let path = format!("{}{name}", self.field_prefix());
            let text = attributes(attrs)
                .find(|(attr, _)| *attr == "rdf:resource")
                .map_or_else(String::new, |(_, value)| value.to_string());
            self.properties.push(Property {
                path,
                depth,
                slot: self.records.len(),
                kind: None,
                is_struct: is_resource_struct(attrs),
                text,
                items: Vec::new(),
                item: None,
            });
            self.records.push(None);
        }

        self.open.push(name.to_string());
    }

    fn close(&mut self, name: &str) -> Result<(), DecodeError> {
        match self.open.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(DecodeError::corrupted(format!(
                    "XMP element <{open}> closed by </{name}>"
                )))
            }
            None => {
                return Err(DecodeError::corrupted(format!(
                    "XMP closing tag </{name}> without opening tag"
                )))
            }
        }

        let depth = self.open.len();
        let Some(property) = self.properties.last_mut() else {
            return Ok(());
        };

        if name == LIST_ITEM && depth == property.depth + 2 {
            if let Some(item) = property.item.take() {
                property.items.push((item.lang, item.text));
            }
        } else if depth == property.depth {
            if let Some(property) = self.properties.pop() {
                let slot = property.slot;
                if let Some(record) = self.records.get_mut(slot) {
                    *record = Some(property.into_record());
                }
            }
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) {
        let Some(property) = self.properties.last_mut() else {
            return;
        };
        if let Some(item) = property.item.as_mut() {
            item.text.push_str(text);
        } else if property.kind.is_none() && !property.is_struct {
            property.text.push_str(text);
        }
    }

    /// Whether a property element opened now belongs to a description or
    /// is a field of the innermost struct.
    fn accepts_property(&self) -> bool {
        match (self.open.last(), self.properties.last()) {
            (Some(parent), _) if parent == DESCRIPTION => true,
            (Some(parent), Some(property)) if parent == LIST_ITEM => {
                property.item.as_ref().is_some_and(|item| item.is_struct)
            }
            (Some(_), Some(property)) => {
                property.is_struct && self.open.len() == property.depth + 1
            }
            _ => false,
        }
    }

    /// A description nested in a property (or one of its items) makes it a
    /// struct. Returns the path prefix of the struct's fields.
    fn begin_struct(&mut self) -> String {
        if let Some(property) = self.properties.last_mut() {
            match property.item.as_mut() {
                Some(item) => item.is_struct = true,
                None => property.is_struct = true,
            }
        }
        self.field_prefix()
    }

    /// `exif:Flash/` for fields of a struct, `xmpMM:History[2]/` for fields
    /// of an array item, empty at the top level.
    fn field_prefix(&self) -> String {
        match self.properties.last() {
            None => String::new(),
            Some(property) if property.item.is_some() => {
                format!("{}[{}]/", property.path, property.items.len() + 1)
            }
            Some(property) => format!("{}/", property.path),
        }
    }

    fn finish(self) -> Result<Vec<TagRecord>, DecodeError> {
        if let Some(open) = self.open.last() {
            return Err(DecodeError::corrupted(format!(
                "XMP element <{open}> is not terminated"
            )));
        }
        let records: Vec<TagRecord> = self.records.into_iter().flatten().collect();
        debug!(properties = records.len(), "Decoded XMP packet");
        Ok(records)
    }
}

impl Property {
    fn into_record(self) -> TagRecord {
        if self.is_struct {
            return text_record(&self.path, "");
        }
        let Some(kind) = self.kind else {
            return text_record(&self.path, self.text.trim());
        };

        let (type_id, value) = match kind {
            ArrayKind::Bag | ArrayKind::Seq => {
                let items = self
                    .items
                    .iter()
                    .map(|(_, text)| unescape(text.trim()).into_owned())
                    .collect();
                let type_id = if kind == ArrayKind::Bag {
                    TypeId::XmpBag
                } else {
                    TypeId::XmpSeq
                };
                (type_id, Value::Array(items))
            }
            ArrayKind::Alt => {
                let items = self
                    .items
                    .iter()
                    .map(|(lang, text)| {
                        let lang = if lang.is_empty() { DEFAULT_LANGUAGE } else { lang };
                        (lang.to_string(), unescape(text.trim()).into_owned())
                    })
                    .collect();
                (TypeId::LangAlt, Value::LangAlt(items))
            }
        };

        let count = value.len() as u64;
        TagRecord::new(property_key(&self.path), 0, type_id, count, value, Printer::None)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn text_record(name: &str, raw: &str) -> TagRecord {
    let text = unescape(raw).into_owned();
    TagRecord::new(
        property_key(name),
        0,
        TypeId::XmpText,
        text.len() as u64,
        Value::Text(text),
        Printer::None,
    )
}

/// `dc:title` becomes `Xmp.dc.title`.
fn property_key(name: &str) -> TagKey {
    let (prefix, local) = name.split_once(':').unwrap_or(("", name));
    TagKey::new(Family::Xmp, prefix, local)
}

/// `rdf:parseType="Resource"` marks a struct written without a nested
/// description.
fn is_resource_struct(attrs: &str) -> bool {
    attributes(attrs).any(|(attr, value)| attr == "rdf:parseType" && value == "Resource")
}

fn is_property(name: &str) -> bool {
    name.split_once(':')
        .is_some_and(|(prefix, _)| !SYNTAX_PREFIXES.contains(&prefix))
}

fn attributes(attrs: &str) -> impl Iterator<Item = (&str, &str)> {
    ATTRIBUTE.captures_iter(attrs).filter_map(|caps| {
        let name = caps.get(1)?.as_str();
        let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
        Some((name, value))
    })
}

fn unescape(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let entity = &caps[1];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}

// =============================================================================
// Tests
// =============================================================================
