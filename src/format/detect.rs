//! Container detection.
//!
//! The container kind is decided from the leading magic bytes only:
//!
//! - **JPEG**: `FF D8` (SOI)
//! - **EXV**: `FF 01 "Exiv2"`, a metadata-only sidecar using JPEG segments
//! - **TIFF**: `II*\0` or `MM\0*`
//!
//! Anything else is not an image this crate can read and fails with
//! `FailedToReadImageData`.

use crate::error::DecodeError;

use super::jpeg::SOI;
use super::tiff::is_tiff_header;

// =============================================================================
// ContainerKind
// =============================================================================

/// Detected container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// JPEG/JFIF/Exif image
    Jpeg,

    /// Exiv2 metadata sidecar
    Exv,

    /// TIFF file whose IFD0 is the Exif image directory
    Tiff,
}

impl ContainerKind {
    /// Get a human-readable name for the container.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerKind::Jpeg => "JPEG",
            ContainerKind::Exv => "EXV",
            ContainerKind::Tiff => "TIFF",
        }
    }

    /// Offset of the first segment after the file signature.
    ///
    /// TIFF has no segments; its header is parsed from offset 0.
    pub const fn body_offset(&self) -> usize {
        match self {
            ContainerKind::Jpeg => SOI.len(),
            ContainerKind::Exv => EXV_SIGNATURE.len(),
            ContainerKind::Tiff => 0,
        }
    }
}

// =============================================================================
// Detection
// =============================================================================

/// Signature of an Exiv2 sidecar: a `FF 01` marker followed by "Exiv2".
const EXV_SIGNATURE: &[u8] = b"\xFF\x01Exiv2";

/// Detect the container of `data`.
///
/// # Errors
/// Returns `FailedToReadImageData` when no known signature is present.
pub fn detect_container(data: &[u8]) -> Result<ContainerKind, DecodeError> {
    if data.starts_with(&SOI) {
        Ok(ContainerKind::Jpeg)
    } else if data.starts_with(EXV_SIGNATURE) {
        Ok(ContainerKind::Exv)
    } else if is_tiff_header(data) {
        Ok(ContainerKind::Tiff)
    } else {
        Err(DecodeError::framing(format!(
            "unknown image type, leading bytes {:02X?}",
            &data[..data.len().min(4)]
        )))
    }
}

// =============================================================================
// Tests
// =============================================================================
