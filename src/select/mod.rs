//! Key selection.
//!
//! A [`Pattern`] matches decoded records by their rendered key
//! (`Family.Group.Name`). A record is selected when the key *contains* a
//! match; patterns are not anchored. Case-insensitive matching folds ASCII
//! letters only, so `gpsl` selects `Exif.GPSInfo.GPSLatitudeRef` but
//! non-ASCII letters must match exactly.
//!
//! On the command line a pattern may carry a trailing `/i` to request
//! case-insensitive matching, see [`parse_grep`].

use regex::bytes::{Regex, RegexBuilder};

use crate::error::PatternError;
use crate::metadata::TagRecord;

// =============================================================================
// Pattern
// =============================================================================

#[derive(Debug, Clone)]
enum Matcher {
    Literal(String),
    Regex(Regex),
}

/// Compiled key matcher. Stateless and reusable across files.
#[derive(Debug, Clone)]
pub struct Pattern {
    original: String,
    case_insensitive: bool,
    matcher: Matcher,
}

impl Pattern {
    /// Compile a regular expression pattern.
    ///
    /// # Errors
    /// Returns `PatternError::InvalidPattern` if the expression is malformed.
    pub fn compile(text: &str, case_insensitive: bool) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(text)
            .unicode(false)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| PatternError::InvalidPattern {
                pattern: text.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            original: text.to_string(),
            case_insensitive,
            matcher: Matcher::Regex(regex),
        })
    }

    /// Build a substring pattern.
    pub fn literal(text: &str, case_insensitive: bool) -> Self {
        Self {
            original: text.to_string(),
            case_insensitive,
            matcher: Matcher::Literal(text.to_string()),
        }
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub const fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }

    /// Whether `key` contains a match. The empty pattern matches every key.
    pub fn is_match(&self, key: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(key.as_bytes()),
            Matcher::Literal(needle) if needle.is_empty() => true,
            Matcher::Literal(needle) if self.case_insensitive => key
                .as_bytes()
                .windows(needle.len())
                .any(|window| window.eq_ignore_ascii_case(needle.as_bytes())),
            Matcher::Literal(needle) => key.contains(needle.as_str()),
        }
    }

    /// Records whose key matches, in their original order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a TagRecord>
    where
        I: IntoIterator<Item = &'a TagRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.is_match(record.key().as_str()))
            .collect()
    }
}

/// Split a `--grep` argument into its pattern and case-insensitivity flag.
///
/// `gpsl/i` (or `gpsl/I`) becomes `("gpsl", true)`; anything else is taken
/// verbatim and matched case-sensitively.
pub fn parse_grep(arg: &str) -> (&str, bool) {
    match arg.strip_suffix("/i").or_else(|| arg.strip_suffix("/I")) {
        Some(pattern) => (pattern, true),
        None => (arg, false),
    }
}

// =============================================================================
// Selector
// =============================================================================

/// Combination of grep patterns and exact keys.
///
/// A record is selected when any pattern matches its key or its key equals
/// one of the exact keys. With neither, everything is selected.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    patterns: Vec<Pattern>,
    keys: Vec<String>,
}

impl Selector {
    pub fn new(patterns: Vec<Pattern>, keys: Vec<String>) -> Self {
        Self { patterns, keys }
    }

    /// Build a selector from raw `--grep` and `--key` arguments.
    ///
    /// # Errors
    /// Returns the first `PatternError` among the grep arguments.
    pub fn from_args(greps: &[String], keys: &[String], literal: bool) -> Result<Self, PatternError> {
        let patterns = greps
            .iter()
            .map(|arg| {
                let (text, case_insensitive) = parse_grep(arg);
                if literal {
                    Ok(Pattern::literal(text, case_insensitive))
                } else {
                    Pattern::compile(text, case_insensitive)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(patterns, keys.to_vec()))
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_match(&self, record: &TagRecord) -> bool {
        if self.patterns.is_empty() && self.keys.is_empty() {
            return true;
        }
        let key = record.key().as_str();
        self.patterns.iter().any(|p| p.is_match(key)) || self.keys.iter().any(|k| k == key)
    }

    /// Records selected by any pattern or key, in their original order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a TagRecord>
    where
        I: IntoIterator<Item = &'a TagRecord>,
    {
        records.into_iter().filter(|record| self.is_match(record)).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
