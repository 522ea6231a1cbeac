// Date token normalization.
//
// Users type dates in a handful of shapes. Each shape is recognized by
// length and separator position first, then its components are validated
// as a real calendar date. Anything else gets one last chance as a trimmed
// YYYY-MM-DD before being rejected.

use chrono::NaiveDate;

use crate::error::{AnalysisError, Result};

/// Canonical textual form of a normalized date.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const SLASHED_FORMAT: &str = "%Y/%m/%d";

/// Parse a user-supplied date token into a calendar date.
///
/// Accepted shapes, tried in order: `YYYYMMDD`, `YYYY-MM-DD`, `YYYY/MM/DD`,
/// and finally any whitespace-padded `YYYY-MM-DD`.
pub fn normalize(token: &str) -> Result<NaiveDate> {
    let bytes = token.as_bytes();

    let parsed = if bytes.len() == 8 && bytes.iter().all(u8::is_ascii_digit) {
        from_parts(token.get(0..4), token.get(4..6), token.get(6..8))
    } else if has_separators(bytes, b'-') {
        from_parts(token.get(0..4), token.get(5..7), token.get(8..10))
            .or_else(|| parse_trimmed(token, CANONICAL_FORMAT))
    } else if has_separators(bytes, b'/') {
        from_parts(token.get(0..4), token.get(5..7), token.get(8..10))
            .or_else(|| parse_trimmed(token, SLASHED_FORMAT))
    } else {
        parse_trimmed(token, CANONICAL_FORMAT)
    };

    parsed.ok_or_else(|| AnalysisError::InvalidDateFormat(token.to_string()))
}

/// Render a date in canonical `YYYY-MM-DD` form.
pub fn canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Separator-shaped tokens with padded or short components, e.g. "2025-01-1 ".
fn parse_trimmed(token: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), format).ok()
}

fn has_separators(bytes: &[u8], sep: u8) -> bool {
    bytes.len() == 10 && bytes[4] == sep && bytes[7] == sep
}

fn from_parts(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> Option<NaiveDate> {
    let year = digits(year?)?;
    let month = digits(month?)?;
    let day = digits(day?)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Parse a component that must consist only of ASCII digits.
fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
