//! # imgmeta
//!
//! Read Exif, IPTC and XMP metadata from image files and filter it by key.
//!
//! Metadata blocks come from untrusted files, so every read is bounds
//! checked, directory walks are bounded in depth and refuse to revisit
//! bytes, and failures are reported as one of two typed errors: the
//! container could not be read (`Failed to read image data`) or metadata
//! inside it is inconsistent (`corrupted image metadata`).
//!
//! ## Architecture
//!
//! - [`io`] - File loading and the bounds-checked byte [`Cursor`]
//! - [`mod@format`] - Container detection and the Exif, IPTC and XMP decoders
//! - [`registry`] - Static tag tables (names, types, value printers)
//! - [`metadata`] - Decoded records, keys and values
//! - [`select`] - Key patterns (regex or substring, optional ASCII case folding)
//! - [`report`] - Table and JSON output
//! - [`config`] / [`app`] - Command-line front end
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgmeta::{decode, Pattern};
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! let metadata = decode(&data).unwrap();
//!
//! let (text, case_insensitive) = imgmeta::parse_grep("gpsl/i");
//! let pattern = Pattern::compile(text, case_insensitive).unwrap();
//! for record in pattern.apply(metadata.records()) {
//!     println!("{} = {}", record.key(), record.display_value(false));
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;
pub mod registry;
pub mod report;
pub mod select;

// Re-export commonly used types
pub use config::{Config, OutputFormat, PrintMode};
pub use error::{AppError, DecodeError, PatternError, ReadError};
pub use format::{decode, decode_with, ContainerKind, DecodeOptions, FamilyFailure, Metadata};
pub use io::{ByteOrder, Cursor};
pub use metadata::{Family, Printer, Rational, TagKey, TagRecord, TypeId, Value};
pub use registry::{lookup, tag_name, TagInfo};
pub use report::{JsonWriter, ReportWriter, TableWriter};
pub use select::{parse_grep, Pattern, Selector};
