//! Configuration management for imgmeta.
//!
//! Options come from command-line arguments via clap; every option can also
//! be set through an environment variable with the `IMGMETA_` prefix:
//!
//! - `IMGMETA_GREP` - Key pattern
//! - `IMGMETA_KEY` - Exact keys, comma-separated
//! - `IMGMETA_LITERAL` - Treat patterns as substrings (default: false)
//! - `IMGMETA_PRINT` - Families to print: a, e, i, x (default: a)
//! - `IMGMETA_FORMAT` - Output format: table, json (default: table)
//! - `IMGMETA_BINARY` - Print large binary values (default: false)
//! - `IMGMETA_MAX_DEPTH` - Maximum directory nesting (default: 50)

use clap::{Parser, ValueEnum};

use crate::format::DEFAULT_MAX_DEPTH;
use crate::metadata::Family;

// =============================================================================
// Default Values
// =============================================================================

/// Largest accepted `--max-depth`.
pub const MAX_DEPTH_LIMIT: u32 = 1000;

// =============================================================================
// Option Values
// =============================================================================

/// Metadata families to report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// All families
    #[default]
    #[value(name = "a")]
    All,
    /// Exif only
    #[value(name = "e")]
    Exif,
    /// IPTC only
    #[value(name = "i")]
    Iptc,
    /// XMP only
    #[value(name = "x")]
    Xmp,
}

impl PrintMode {
    /// Whether records of `family` are printed in this mode.
    pub const fn includes(self, family: Family) -> bool {
        matches!(
            (self, family),
            (PrintMode::All, _)
                | (PrintMode::Exif, Family::Exif)
                | (PrintMode::Iptc, Family::Iptc)
                | (PrintMode::Xmp, Family::Xmp)
        )
    }
}

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// JSON array
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// imgmeta - Print Exif, IPTC and XMP metadata of image files.
///
/// Keys can be filtered with regular expressions; append `/i` to a pattern
/// to match case-insensitively, e.g. `--grep gpsl/i`.
#[derive(Parser, Debug, Clone)]
#[command(name = "imgmeta")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image files to read.
    #[arg(required = true)]
    pub files: Vec<String>,

    // =========================================================================
    // Selection
    // =========================================================================
    /// Only print keys matching this pattern (repeatable, `PATTERN[/i]`).
    #[arg(short = 'g', long = "grep", env = "IMGMETA_GREP")]
    pub greps: Vec<String>,

    /// Only print this exact key (repeatable).
    #[arg(short = 'K', long = "key", env = "IMGMETA_KEY", value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Treat grep patterns as plain substrings instead of regular expressions.
    #[arg(long, default_value_t = false, env = "IMGMETA_LITERAL")]
    pub literal: bool,

    /// Metadata families to print.
    #[arg(short, long, value_enum, default_value_t = PrintMode::All, env = "IMGMETA_PRINT")]
    pub print: PrintMode,

    // =========================================================================
    // Output
    // =========================================================================
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, env = "IMGMETA_FORMAT")]
    pub format: OutputFormat,

    /// Print large binary values instead of a placeholder.
    #[arg(short, long, default_value_t = false, env = "IMGMETA_BINARY")]
    pub binary: bool,

    // =========================================================================
    // Decoder Limits
    // =========================================================================
    /// Maximum nesting depth of metadata directories.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "IMGMETA_MAX_DEPTH")]
    pub max_depth: u32,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one file is required".to_string());
        }

        if self.files.iter().any(|f| f.is_empty()) {
            return Err("File paths must not be empty".to_string());
        }

        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(format!(
                "max_depth must be between 1 and {MAX_DEPTH_LIMIT}, got {}",
                self.max_depth
            ));
        }

        Ok(())
    }

    /// Whether rows are prefixed with their file name.
    pub fn prefix_files(&self) -> bool {
        self.files.len() > 1
    }
}

// =============================================================================
// Tests
// =============================================================================
