//! Key selection integration tests.
//!
//! Tests verify:
//! - Case-insensitive greps select the GPS coordinate keys
//! - Selection keeps decode order and is idempotent
//! - Case folding is limited to ASCII
//! - Invalid expressions are rejected before any record is matched
//! - The ordering and folding rules hold for generated keys and patterns

use imgmeta::{
    decode, parse_grep, Family, Pattern, PatternError, Printer, Selector, TagKey, TagRecord,
    TypeId, Value,
};
use proptest::prelude::*;

use super::test_utils::{create_gps_jpeg, GPS_JPEG_KEYS};

fn records() -> Vec<TagRecord> {
    decode(&create_gps_jpeg()).unwrap().into_records()
}

fn keys<'a>(records: &[&'a TagRecord]) -> Vec<&'a str> {
    records.iter().map(|r| r.key().as_str()).collect()
}

fn grep(arg: &str) -> Pattern {
    let (text, case_insensitive) = parse_grep(arg);
    Pattern::compile(text, case_insensitive).unwrap()
}

const GPS_COORDINATE_KEYS: [&str; 4] = [
    "Exif.GPSInfo.GPSLatitudeRef",
    "Exif.GPSInfo.GPSLatitude",
    "Exif.GPSInfo.GPSLongitudeRef",
    "Exif.GPSInfo.GPSLongitude",
];

// =============================================================================
// Pattern Matching
// =============================================================================

#[test]
fn test_case_insensitive_grep_selects_coordinates() {
    let records = records();
    let selected = grep("gpsl/i").apply(&records);

    assert_eq!(keys(&selected), GPS_COORDINATE_KEYS);
    assert_eq!(selected[0].display_value(false), "North");
    assert_eq!(selected[1].display_value(false), "52 deg 3' 49.02\"");
    assert_eq!(selected[2].display_value(false), "East");
    assert_eq!(selected[3].display_value(false), "1 deg 13' 49.16\"");
}

#[test]
fn test_case_sensitive_grep_needs_exact_case() {
    let records = records();

    assert!(grep("gpsl").apply(&records).is_empty());
    assert_eq!(keys(&grep("GPSL").apply(&records)), GPS_COORDINATE_KEYS);
}

#[test]
fn test_empty_pattern_selects_everything_in_order() {
    let records = records();
    let selected = grep("").apply(&records);

    assert_eq!(keys(&selected), GPS_JPEG_KEYS);
}

#[test]
fn test_family_prefix() {
    let records = records();
    let selected = grep(r"^Iptc\.").apply(&records);

    assert_eq!(
        keys(&selected),
        [
            "Iptc.Application2.RecordVersion",
            "Iptc.Application2.Caption",
            "Iptc.Application2.DateCreated",
        ]
    );
}

#[test]
fn test_selection_is_idempotent_subsequence() {
    let records = records();
    for arg in ["gpsl/i", "Exif", "Version", "Rating$", "^Xmp", "zzz"] {
        let pattern = grep(arg);
        let once = pattern.apply(&records);
        let twice = pattern.apply(once.iter().copied());
        assert_eq!(once, twice, "pattern {arg}");

        // Selected keys appear in the same relative order as the input
        let mut remaining = records.iter();
        for selected in &once {
            assert!(remaining.any(|r| std::ptr::eq(r, *selected)), "pattern {arg}");
        }
    }
}

#[test]
fn test_case_insensitive_is_superset() {
    let records = records();
    for text in ["GPS", "gps", "Lat", "iptc", "XMP"] {
        let sensitive = Pattern::compile(text, false).unwrap();
        let insensitive = Pattern::compile(text, true).unwrap();
        let loose = insensitive.apply(&records);
        for record in sensitive.apply(&records) {
            assert!(loose.contains(&record), "{text}: {}", record.key());
        }
    }
}

#[test]
fn test_folding_is_ascii_only() {
    // U+00C9 does not fold to U+00E9 with ASCII-only matching
    let regex = Pattern::compile("\u{e9}", true).unwrap();
    assert!(!regex.is_match("Xmp.dc.title.\u{c9}"));
    assert!(regex.is_match("Xmp.dc.title.\u{e9}"));

    let literal = Pattern::literal("\u{e9}", true);
    assert!(!literal.is_match("Xmp.dc.title.\u{c9}"));
}

#[test]
fn test_literal_and_regex_modes() {
    let records = records();

    // `.` is a metacharacter only in regex mode
    let regex = Pattern::compile("Exif.Image", false).unwrap();
    let literal = Pattern::literal("Exif.Image", false);
    assert_eq!(regex.apply(&records).len(), 5);
    assert_eq!(literal.apply(&records).len(), 5);

    let literal = Pattern::literal("(", false);
    assert!(literal.apply(&records).is_empty());
    assert!(!literal.is_regex());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_pattern() {
    let err = Pattern::compile("(", false).unwrap_err();
    let PatternError::InvalidPattern { pattern, .. } = &err;
    assert_eq!(pattern, "(");
    assert!(err.to_string().starts_with("Invalid pattern '('"));
}

#[test]
fn test_selector_rejects_any_invalid_grep() {
    let greps = vec!["gpsl/i".to_string(), "[".to_string()];
    assert!(Selector::from_args(&greps, &[], false).is_err());

    // The same text is fine as a substring
    assert!(Selector::from_args(&greps, &[], true).is_ok());
}

// =============================================================================
// Selector
// =============================================================================

#[test]
fn test_selector_combines_greps_and_keys() {
    let records = records();
    let selector = Selector::from_args(
        &["^Iptc.*Caption".to_string()],
        &["Xmp.xmp.Rating".to_string(), "Exif.Image.Make".to_string()],
        false,
    )
    .unwrap();

    assert_eq!(
        keys(&selector.apply(&records)),
        ["Exif.Image.Make", "Iptc.Application2.Caption", "Xmp.xmp.Rating"]
    );
}

#[test]
fn test_exact_keys_are_case_sensitive() {
    let records = records();
    let selector = Selector::from_args(&[], &["exif.image.make".to_string()], false).unwrap();
    assert!(selector.apply(&records).is_empty());
}

#[test]
fn test_empty_selector_selects_everything() {
    let records = records();
    assert_eq!(Selector::default().apply(&records).len(), GPS_JPEG_KEYS.len());
}

// =============================================================================
// Properties
// =============================================================================

fn generated_record((family, group, name): (u8, String, String)) -> TagRecord {
    let family = match family {
        0 => Family::Exif,
        1 => Family::Iptc,
        _ => Family::Xmp,
    };
    TagRecord::new(
        TagKey::new(family, group, name),
        0,
        TypeId::XmpText,
        0,
        Value::Text(String::new()),
        Printer::None,
    )
}

fn generated_records() -> impl Strategy<Value = Vec<TagRecord>> {
    prop::collection::vec(
        (0..3u8, "[A-Za-z]{1,8}", "[A-Za-z0-9]{1,12}").prop_map(generated_record),
        0..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_selection_is_ordered_subsequence(
        records in generated_records(),
        text in "\\^?[A-Za-z.]{0,4}\\$?",
        case_insensitive in any::<bool>(),
    ) {
        let pattern = Pattern::compile(&text, case_insensitive).unwrap();
        let selected = pattern.apply(&records);

        let mut remaining = records.iter();
        for record in &selected {
            prop_assert!(remaining.any(|r| std::ptr::eq(r, *record)));
        }

        // Nothing that matches is left out
        let matching = records.iter().filter(|r| pattern.is_match(r.key().as_str())).count();
        prop_assert_eq!(selected.len(), matching);
    }

    #[test]
    fn test_selection_is_idempotent(
        records in generated_records(),
        text in "[A-Za-z.]{0,4}",
        case_insensitive in any::<bool>(),
    ) {
        let pattern = Pattern::compile(&text, case_insensitive).unwrap();
        let once = pattern.apply(&records);
        let twice = pattern.apply(once.iter().copied());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_case_folding_matches_lowercase_comparison(
        records in generated_records(),
        text in "[A-Za-z]{0,4}",
    ) {
        let regex = Pattern::compile(&text, true).unwrap();
        let literal = Pattern::literal(&text, true);
        let needle = text.to_ascii_lowercase();

        for record in &records {
            let key = record.key().as_str();
            let expected = key.to_ascii_lowercase().contains(&needle);
            prop_assert_eq!(regex.is_match(key), expected, "{} in {}", text, key);
            prop_assert_eq!(literal.is_match(key), expected, "{} in {}", text, key);
        }
    }

    #[test]
    fn test_case_insensitive_selects_superset(
        records in generated_records(),
        text in "[A-Za-z.]{0,4}",
    ) {
        let strict = Pattern::compile(&text, false).unwrap().apply(&records);
        let loose = Pattern::compile(&text, true).unwrap().apply(&records);
        for record in strict {
            prop_assert!(loose.iter().any(|r| std::ptr::eq(*r, record)));
        }
    }

    #[test]
    fn test_selector_is_union_of_greps_and_keys(
        records in generated_records(),
        greps in prop::collection::vec("[A-Za-z]{1,3}(/i)?", 0..3),
        key_picks in prop::collection::vec(any::<prop::sample::Index>(), 0..3),
    ) {
        let keys: Vec<String> = if records.is_empty() {
            Vec::new()
        } else {
            key_picks
                .iter()
                .map(|pick| records[pick.index(records.len())].key().to_string())
                .collect()
        };
        let selector = Selector::from_args(&greps, &keys, false).unwrap();
        let patterns: Vec<Pattern> = greps.iter().map(|arg| grep(arg)).collect();

        let expected: Vec<&TagRecord> = records
            .iter()
            .filter(|r| {
                let key = r.key().as_str();
                (greps.is_empty() && keys.is_empty())
                    || patterns.iter().any(|p| p.is_match(key))
                    || keys.iter().any(|k| k == key)
            })
            .collect();
        prop_assert_eq!(selector.apply(&records), expected);
    }
}
