//! Metadata decoding for image containers.
//!
//! [`decode`] detects the container, locates the metadata blocks it carries
//! and decodes each family independently:
//!
//! - **Exif**: TIFF directories ([`tiff`]), from a JPEG APP1 segment or the
//!   file itself for raw TIFF
//! - **IPTC**: IIM datasets inside Photoshop resources ([`iptc`])
//! - **XMP**: RDF/XML packet ([`xmp`])
//!
//! # Failure policy
//!
//! A broken container (unknown signature, segment framing) fails the whole
//! file with `FailedToReadImageData`. A family whose block is found but
//! cannot be decoded contributes no records. If every located family failed,
//! the first failure is returned; otherwise the surviving records are
//! returned along with the list of [`FamilyFailure`]s.

pub mod detect;
pub mod iptc;
pub mod jpeg;
pub mod tiff;
pub mod xmp;

use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::metadata::{Family, TagRecord};

pub use detect::{detect_container, ContainerKind};
pub use tiff::DEFAULT_MAX_DEPTH;

// =============================================================================
// Options
// =============================================================================

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of Exif sub-directories
    pub max_depth: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// A family that was located but failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyFailure {
    pub family: Family,
    pub error: DecodeError,
}

/// Decoded metadata of one file.
#[derive(Debug, Clone)]
pub struct Metadata {
    container: ContainerKind,
    records: Vec<TagRecord>,
    failures: Vec<FamilyFailure>,
}

impl Metadata {
    pub fn container(&self) -> ContainerKind {
        self.container
    }

    /// Records in decode order: Exif, then IPTC, then XMP.
    pub fn records(&self) -> &[TagRecord] {
        &self.records
    }

    /// Families that failed while others succeeded.
    pub fn failures(&self) -> &[FamilyFailure] {
        &self.failures
    }

    pub fn into_records(self) -> Vec<TagRecord> {
        self.records
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode all metadata in `data` with default options.
pub fn decode(data: &[u8]) -> Result<Metadata, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode all metadata in `data`.
///
/// # Errors
/// - `FailedToReadImageData` if the container cannot be read
/// - the first family error if every located family failed
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Metadata, DecodeError> {
    let container = detect_container(data)?;
    debug!(container = container.name(), size = data.len(), "Detected container");

    let mut outcomes = Vec::new();

    match container {
        ContainerKind::Tiff => {
            // The file is the TIFF structure, so a bad header is a framing fault
            let header = tiff::TiffHeader::parse(data)
                .map_err(|e| DecodeError::framing(e.reason()))?;
            let walker = tiff::DirectoryWalker::new(data, &header, options.max_depth);
            outcomes.push((Family::Exif, walker.walk(header.first_ifd_offset)));
        }
        ContainerKind::Jpeg | ContainerKind::Exv => {
            let segments = jpeg::scan_segments(data, container.body_offset())?;
            if let Some(exif) = segments.exif {
                outcomes.push((Family::Exif, tiff::decode_tiff(exif, options.max_depth)));
            }
            if let Some(resources) = &segments.photoshop {
                outcomes.push((Family::Iptc, iptc::decode_photoshop(resources)));
            }
            if let Some(packet) = segments.xmp {
                outcomes.push((Family::Xmp, xmp::decode_xmp(packet)));
            }
        }
    }

    let (records, failures) = collect(outcomes)?;
    Ok(Metadata {
        container,
        records,
        failures,
    })
}

type Outcome = (Family, Result<Vec<TagRecord>, DecodeError>);

fn collect(outcomes: Vec<Outcome>) -> Result<(Vec<TagRecord>, Vec<FamilyFailure>), DecodeError> {
    let all_failed = !outcomes.is_empty() && outcomes.iter().all(|(_, r)| r.is_err());

    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (family, outcome) in outcomes {
        match outcome {
            Ok(decoded) => {
                debug!(family = family.name(), records = decoded.len(), "Decoded family");
                records.extend(decoded);
            }
            Err(error) => {
                if all_failed {
                    debug!(family = family.name(), reason = error.reason(), "Family failed");
                    // First failure wins
                    return Err(error);
                }
                warn!(
                    family = family.name(),
                    reason = error.reason(),
                    "Skipping {} metadata: {}",
                    family,
                    error
                );
                failures.push(FamilyFailure { family, error });
            }
        }
    }

    Ok((records, failures))
}

// =============================================================================
// Tests
// =============================================================================
