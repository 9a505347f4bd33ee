//! TIFF structure decoding for Exif metadata.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF data declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values are read with it.
//!
//! - **IFD (Image File Directory)**: a counted table of 12 byte entries, each
//!   a tag id, a field type, an element count and a value or offset.
//!
//! - **Inline vs offset values**: values of up to 4 bytes are stored inline
//!   in the entry, larger ones at an offset relative to the TIFF header.
//!
//! - **Sub-directories**: the Exif, GPS and Interoperability IFDs are reached
//!   through pointer tags; IFD1 through IFD0's next-IFD link.

mod ifd;
mod parser;
mod values;

pub use ifd::{decode_tiff, DirectoryEntry, DirectoryWalker, ValueLocation, DEFAULT_MAX_DEPTH};
pub use parser::{is_tiff_header, TiffHeader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE};
pub use values::decode_value;
