//! Human-readable interpretation of well-known tags.
//!
//! The registry attaches a [`Printer`] to each known tag. A printer turns the
//! raw value into the text users expect (`North` instead of `N`, degrees for
//! GPS coordinates). When the value does not have the shape a printer
//! expects, the plain value is shown in parentheses.

use super::value::{Rational, Value};

/// Interpretation rule for a tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Printer {
    /// Plain value
    #[default]
    None,
    LatitudeRef,
    LongitudeRef,
    /// Three rationals: degrees, minutes, seconds
    GpsCoordinate,
    AltitudeRef,
    Altitude,
    GpsTimeStamp,
    Orientation,
    ResolutionUnit,
    ExposureTime,
    FNumber,
    FocalLength,
    ColorSpace,
    /// Four ASCII digits such as `0230`
    Version,
    YCbCrPositioning,
    IptcDate,
    IptcTime,
}

impl Printer {
    /// Render `value` according to this rule.
    pub fn render(self, value: &Value) -> String {
        let interpreted = match self {
            Printer::None => return value.to_string(),
            Printer::LatitudeRef => compass(value, [("N", "North"), ("S", "South")]),
            Printer::LongitudeRef => compass(value, [("E", "East"), ("W", "West")]),
            Printer::GpsCoordinate => degrees(value),
            Printer::AltitudeRef => lookup(
                value,
                &[(0, "Above sea level"), (1, "Below sea level")],
            ),
            Printer::Altitude => value
                .rational_at(0)
                .and_then(decimal)
                .map(|v| format!("{v} m")),
            Printer::GpsTimeStamp => time_stamp(value),
            Printer::Orientation => lookup(
                value,
                &[
                    (1, "top, left"),
                    (2, "top, right"),
                    (3, "bottom, right"),
                    (4, "bottom, left"),
                    (5, "left, top"),
                    (6, "right, top"),
                    (7, "right, bottom"),
                    (8, "left, bottom"),
                ],
            ),
            Printer::ResolutionUnit => lookup(value, &[(1, "none"), (2, "inch"), (3, "cm")]),
            Printer::ExposureTime => exposure_time(value),
            Printer::FNumber => value
                .rational_at(0)
                .and_then(ratio)
                .map(|f| format!("F{f:.1}")),
            Printer::FocalLength => value
                .rational_at(0)
                .and_then(ratio)
                .map(|f| format!("{f:.1} mm")),
            Printer::ColorSpace => lookup(value, &[(1, "sRGB"), (2, "Adobe RGB"), (0xFFFF, "Uncalibrated")]),
            Printer::Version => version(value),
            Printer::YCbCrPositioning => lookup(value, &[(1, "Centered"), (2, "Co-sited")]),
            Printer::IptcDate => iptc_date(value),
            Printer::IptcTime => iptc_time(value),
        };

        interpreted.unwrap_or_else(|| format!("({value})"))
    }
}

fn ratio(r: Rational<i64>) -> Option<f64> {
    (r.den != 0).then(|| r.num as f64 / r.den as f64)
}

fn compass(value: &Value, names: [(&str, &'static str); 2]) -> Option<String> {
    let text = value.as_text()?.trim();
    names
        .iter()
        .find(|(code, _)| *code == text)
        .map(|(_, name)| (*name).to_string())
}

fn lookup(value: &Value, names: &[(u32, &'static str)]) -> Option<String> {
    let raw = value.unsigned_at(0)?;
    names
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, name)| (*name).to_string())
}

/// Digits after the decimal point needed to show `1/den` exactly when `den`
/// is a power of ten, two otherwise.
fn precision(den: i64) -> usize {
    let mut d = den.unsigned_abs();
    let mut digits = 0;
    while d > 1 && d % 10 == 0 {
        d /= 10;
        digits += 1;
    }
    if d == 1 {
        digits
    } else {
        2
    }
}

/// Render a rational as an integer when exact, as a decimal otherwise.
fn decimal(r: Rational<i64>) -> Option<String> {
    if r.den == 0 {
        return None;
    }
    if r.num % r.den == 0 {
        return Some((r.num / r.den).to_string());
    }
    Some(format!("{:.*}", precision(r.den), r.num as f64 / r.den as f64))
}

fn degrees(value: &Value) -> Option<String> {
    if value.len() != 3 {
        return None;
    }
    let parts = (0..3)
        .map(|i| value.rational_at(i))
        .collect::<Option<Vec<_>>>()?;

    // Trailing zero minutes/seconds are dropped
    let last = parts.iter().rposition(|r| r.num != 0).unwrap_or(0);

    let mut out = String::new();
    for (i, part) in parts.iter().take(last + 1).enumerate() {
        let text = decimal(*part)?;
        match i {
            0 => out.push_str(&format!("{text} deg")),
            1 => out.push_str(&format!(" {text}'")),
            _ => out.push_str(&format!(" {text}\"")),
        }
    }
    Some(out)
}

fn time_stamp(value: &Value) -> Option<String> {
    if value.len() != 3 {
        return None;
    }
    let h = ratio(value.rational_at(0)?)?;
    let m = ratio(value.rational_at(1)?)?;
    let s = ratio(value.rational_at(2)?)?;
    let seconds = if s.fract() == 0.0 {
        format!("{:02}", s as u32)
    } else {
        format!("{s:05.2}")
    };
    Some(format!("{:02}:{:02}:{}", h as u32, m as u32, seconds))
}

fn exposure_time(value: &Value) -> Option<String> {
    let r = value.rational_at(0)?;
    let seconds = ratio(r)?;
    if seconds >= 1.0 || r.num == 0 {
        return decimal(r).map(|s| format!("{s} s"));
    }
    let denominator = (r.den as f64 / r.num as f64).round() as i64;
    Some(format!("1/{denominator} s"))
}

fn version(value: &Value) -> Option<String> {
    let bytes: Vec<u8> = match value {
        Value::Bytes(b) => b.clone(),
        Value::Ascii(s) => s.as_bytes().to_vec(),
        _ => return None,
    };
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let major = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    Some(format!("{}.{}{}", major, bytes[2] as char, bytes[3] as char))
}

fn iptc_date(value: &Value) -> Option<String> {
    let text = value.as_text()?;
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}-{}-{}", &text[0..4], &text[4..6], &text[6..8]))
}

fn iptc_time(value: &Value) -> Option<String> {
    let text = value.as_text()?;
    let bytes = text.as_bytes();
    if bytes.len() != 6 && bytes.len() != 11 {
        return None;
    }
    if !bytes[..6].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut out = format!("{}:{}:{}", &text[0..2], &text[2..4], &text[4..6]);
    if bytes.len() == 11 {
        if !matches!(bytes[6], b'+' | b'-') || !bytes[7..].iter().all(u8::is_ascii_digit) {
            return None;
        }
        out.push_str(&format!("{}{}:{}", &text[6..7], &text[7..9], &text[9..11]));
    }
    Some(out)
}

// =============================================================================
// Tests
// =============================================================================
