//! Value types and materialized values.
//!
//! [`TypeId`] is the closed set of semantic types a record can carry. TIFF
//! field types keep their numeric codes so raw entries convert directly;
//! IPTC and XMP types have no on-disk code.

use std::fmt;

// =============================================================================
// TypeId
// =============================================================================

/// Semantic type of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    // TIFF field types
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Ifd,

    // IPTC dataset types
    String,
    Date,
    Time,

    // XMP property types
    XmpText,
    XmpBag,
    XmpSeq,
    LangAlt,
}

impl TypeId {
    /// Map a TIFF field type code to a type.
    ///
    /// Returns `None` for codes outside the TIFF 6.0 set (1-13).
    pub fn from_tiff_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(TypeId::Byte),
            2 => Some(TypeId::Ascii),
            3 => Some(TypeId::Short),
            4 => Some(TypeId::Long),
            5 => Some(TypeId::Rational),
            6 => Some(TypeId::SByte),
            7 => Some(TypeId::Undefined),
            8 => Some(TypeId::SShort),
            9 => Some(TypeId::SLong),
            10 => Some(TypeId::SRational),
            11 => Some(TypeId::Float),
            12 => Some(TypeId::Double),
            13 => Some(TypeId::Ifd),
            _ => None,
        }
    }

    /// Size of one element in bytes for TIFF types, `1` for everything else.
    #[inline]
    pub const fn element_size(self) -> u64 {
        match self {
            TypeId::Short | TypeId::SShort => 2,
            TypeId::Long | TypeId::SLong | TypeId::Float | TypeId::Ifd => 4,
            TypeId::Rational | TypeId::SRational | TypeId::Double => 8,
            _ => 1,
        }
    }

    /// Display name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            TypeId::Byte => "Byte",
            TypeId::Ascii => "Ascii",
            TypeId::Short => "Short",
            TypeId::Long => "Long",
            TypeId::Rational => "Rational",
            TypeId::SByte => "SByte",
            TypeId::Undefined => "Undefined",
            TypeId::SShort => "SShort",
            TypeId::SLong => "SLong",
            TypeId::SRational => "SRational",
            TypeId::Float => "Float",
            TypeId::Double => "Double",
            TypeId::Ifd => "Ifd",
            TypeId::String => "String",
            TypeId::Date => "Date",
            TypeId::Time => "Time",
            TypeId::XmpText => "XmpText",
            TypeId::XmpBag => "XmpBag",
            TypeId::XmpSeq => "XmpSeq",
            TypeId::LangAlt => "LangAlt",
        }
    }

    /// Types whose values are opaque byte runs.
    #[inline]
    pub const fn is_binary(self) -> bool {
        matches!(self, TypeId::Byte | TypeId::SByte | TypeId::Undefined)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Value
// =============================================================================

/// A rational number as stored on disk (no normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational<T> {
    pub num: T,
    pub den: T,
}

impl<T: Into<f64> + Copy> Rational<T> {
    /// Floating-point value, `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        let den: f64 = self.den.into();
        if den == 0.0 {
            None
        } else {
            Some(self.num.into() / den)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Rational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Materialized value of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw bytes (Byte, SByte, Undefined)
    Bytes(Vec<u8>),
    /// ASCII text, cut at the first NUL
    Ascii(String),
    /// Short, Long and Ifd values
    Unsigned(Vec<u32>),
    /// SShort and SLong values
    Signed(Vec<i32>),
    URational(Vec<Rational<u32>>),
    SRational(Vec<Rational<i32>>),
    /// Float and Double values
    Float(Vec<f64>),
    /// IPTC strings, dates, times and XMP simple text
    Text(String),
    /// XMP Bag and Seq items
    Array(Vec<String>),
    /// XMP language alternatives as `(lang, text)`
    LangAlt(Vec<(String, String)>),
}

impl Value {
    /// Number of elements, used where the on-disk count is not available.
    pub fn len(&self) -> usize {
        match self {
            Value::Bytes(v) => v.len(),
            Value::Ascii(s) | Value::Text(s) => s.len(),
            Value::Unsigned(v) => v.len(),
            Value::Signed(v) => v.len(),
            Value::URational(v) => v.len(),
            Value::SRational(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Array(v) => v.len(),
            Value::LangAlt(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`th element as an unsigned integer, when it is one.
    pub fn unsigned_at(&self, i: usize) -> Option<u32> {
        match self {
            Value::Unsigned(v) => v.get(i).copied(),
            Value::Bytes(v) => v.get(i).map(|&b| b as u32),
            Value::Signed(v) => v.get(i).and_then(|&n| u32::try_from(n).ok()),
            _ => None,
        }
    }

    /// The `i`th element as a rational, when it is one.
    pub fn rational_at(&self, i: usize) -> Option<Rational<i64>> {
        match self {
            Value::URational(v) => v.get(i).map(|r| Rational {
                num: r.num as i64,
                den: r.den as i64,
            }),
            Value::SRational(v) => v.get(i).map(|r| Rational {
                num: r.num as i64,
                den: r.den as i64,
            }),
            _ => None,
        }
    }

    /// Text content of string-like values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Ascii(s) | Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Plain, uninterpreted rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(v) => write_joined(f, v.iter(), " "),
            Value::Ascii(s) | Value::Text(s) => f.write_str(s),
            Value::Unsigned(v) => write_joined(f, v.iter(), " "),
            Value::Signed(v) => write_joined(f, v.iter(), " "),
            Value::URational(v) => write_joined(f, v.iter(), " "),
            Value::SRational(v) => write_joined(f, v.iter(), " "),
            Value::Float(v) => write_joined(f, v.iter(), " "),
            Value::Array(v) => write_joined(f, v.iter(), ", "),
            Value::LangAlt(v) => {
                for (i, (lang, text)) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "lang=\"{lang}\" {text}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_joined<I, T>(f: &mut fmt::Formatter<'_>, items: I, sep: &str) -> fmt::Result
where
    I: Iterator<Item = T>,
    T: fmt::Display,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
