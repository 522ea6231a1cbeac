// Date periods: token normalization, inclusive ranges, record filtering.

pub mod date;
pub mod filter;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// An inclusive calendar range. Construction guarantees start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AnalysisError::InvalidRangeOrder { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a `"<date>,<date>"` range token.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split(',').collect();
        let [start, end] = parts.as_slice() else {
            return Err(AnalysisError::InvalidRangeToken(token.to_string()));
        };
        Self::new(date::normalize(start)?, date::normalize(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days covered, both endpoints included.
    pub fn span_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", date::canonical(self.start), date::canonical(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_mixed_shapes() {
        let range = DateRange::parse("20250101,2025/01/31").unwrap();
        assert_eq!(range.start(), date(2025, 1, 1));
        assert_eq!(range.end(), date(2025, 1, 31));
        assert_eq!(range.span_days(), 31);
    }

    #[test]
    fn test_parse_tolerates_space_after_comma() {
        let range = DateRange::parse("2025-01-01, 2025-01-02").unwrap();
        assert_eq!(range.span_days(), 2);
    }

    #[test]
    fn test_single_date_is_invalid_token() {
        assert!(matches!(
            DateRange::parse("2025-01-01"),
            Err(AnalysisError::InvalidRangeToken(_))
        ));
    }

    #[test]
    fn test_three_dates_is_invalid_token() {
        assert!(matches!(
            DateRange::parse("2025-01-01,2025-01-02,2025-01-03"),
            Err(AnalysisError::InvalidRangeToken(_))
        ));
    }

    #[test]
    fn test_bad_component_is_date_error() {
        assert!(matches!(
            DateRange::parse("2025-01-01,2025-13-01"),
            Err(AnalysisError::InvalidDateFormat(t)) if t == "2025-13-01"
        ));
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            DateRange::parse("2025-02-01,2025-01-01"),
            Err(AnalysisError::InvalidRangeOrder { .. })
        ));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2025-02-01,2025-02-01").unwrap();
        assert_eq!(range.span_days(), 1);
        assert!(range.contains(date(2025, 2, 1)));
        assert!(!range.contains(date(2025, 2, 2)));
    }

    #[test]
    fn test_display() {
        let range = DateRange::parse("20250101,20250102").unwrap();
        assert_eq!(range.to_string(), "2025-01-01..2025-01-02");
    }
}
