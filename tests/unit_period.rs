// Unit tests for date normalization, range parsing and period filtering.
//
// Tests the accepted token shapes, their equivalence, and the inclusive
// filtering rule over a small synthetic table.

use chrono::NaiveDate;

use review_pulse::error::AnalysisError;
use review_pulse::period::date::{canonical, normalize};
use review_pulse::period::filter::filter;
use review_pulse::period::DateRange;
use review_pulse::table::Record;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn records() -> Vec<Record> {
    vec![
        Record::new(date(2024, 12, 31), Some("Old"), Some("year end")),
        Record::new(date(2025, 1, 1), Some("Great"), Some("game")),
        Record::new(date(2025, 1, 15), None, Some("lag again")),
        Record::new(date(2025, 1, 31), Some("Cards"), None),
        Record::new(date(2025, 2, 1), Some("New"), Some("season")),
    ]
}

// ============================================================
// normalize: shape equivalence
// ============================================================

#[test]
fn all_accepted_shapes_normalize_to_the_same_date() {
    let expected = date(2025, 3, 9);
    for token in ["20250309", "2025-03-09", "2025/03/09", " 2025-03-09 "] {
        assert_eq!(normalize(token).unwrap(), expected, "token {token:?}");
    }
}

#[test]
fn canonical_form_is_a_fixed_point() {
    for token in ["20250101", "2025/06/30", "2024-02-29"] {
        let once = canonical(normalize(token).unwrap());
        let twice = canonical(normalize(&once).unwrap());
        assert_eq!(once, twice);
    }
}

#[test]
fn impossible_calendar_dates_are_rejected() {
    for token in ["20250230", "2025-13-01", "2023/02/29", "00000000"] {
        assert!(
            matches!(normalize(token), Err(AnalysisError::InvalidDateFormat(_))),
            "token {token:?} should be rejected"
        );
    }
}

#[test]
fn unrecognized_shapes_are_rejected() {
    for token in ["", "2025", "January 5", "05/01/2025", "2025.01.05", "2025010"] {
        assert!(
            matches!(normalize(token), Err(AnalysisError::InvalidDateFormat(_))),
            "token {token:?} should be rejected"
        );
    }
}

// ============================================================
// DateRange::parse
// ============================================================

#[test]
fn range_with_mixed_shapes_parses() {
    let range = DateRange::parse("20250101,2025/01/31").unwrap();
    assert_eq!(range.start(), date(2025, 1, 1));
    assert_eq!(range.end(), date(2025, 1, 31));
    assert_eq!(range.span_days(), 31);
}

#[test]
fn single_day_range_spans_one_day() {
    assert_eq!(DateRange::parse("2025-01-01,2025-01-01").unwrap().span_days(), 1);
}

#[test]
fn range_token_needs_exactly_two_parts() {
    for token in ["20250101", "20250101,20250102,20250103", ""] {
        assert!(
            matches!(DateRange::parse(token), Err(AnalysisError::InvalidRangeToken(_))),
            "token {token:?} should be rejected"
        );
    }
}

#[test]
fn reversed_range_is_rejected() {
    let err = DateRange::parse("20250131,20250101").unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidRangeOrder { start, end }
            if start == date(2025, 1, 31) && end == date(2025, 1, 1)
    ));
}

// ============================================================
// filter: inclusive bounds and counts
// ============================================================

#[test]
fn filter_includes_both_bounds() {
    let period = filter(&records(), "20250101,20250131").unwrap();
    assert_eq!(period.count, 3);
    assert_eq!(period.records.len(), period.count);
    assert!(period.records.iter().all(|r| period.range.contains(r.date)));
}

#[test]
fn filter_preserves_record_order() {
    let period = filter(&records(), "2024-12-01,2025-12-31").unwrap();
    let dates: Vec<NaiveDate> = period.records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 12, 31),
            date(2025, 1, 1),
            date(2025, 1, 15),
            date(2025, 1, 31),
            date(2025, 2, 1)
        ]
    );
}

#[test]
fn filter_span_is_the_range_not_the_data() {
    // Only one record falls inside, but the range covers 28 days
    let period = filter(&records(), "2025-02-01,2025-02-28").unwrap();
    assert_eq!(period.count, 1);
    assert_eq!(period.span_days, 28);
}

#[test]
fn filter_empty_match_is_an_error() {
    let err = filter(&records(), "20260101,20260131").unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyRangeResult(ref t) if t == "20260101,20260131"));
}

#[test]
fn filter_label_is_the_raw_token() {
    let period = filter(&records(), "20250101,2025-01-31").unwrap();
    assert_eq!(period.label, "20250101,2025-01-31");
}

#[test]
fn combined_texts_follow_records() {
    let period = filter(&records(), "20250101,20250131").unwrap();
    assert_eq!(
        period.combined_texts(),
        vec!["Greatgame".to_string(), "lag again".to_string(), "Cards".to_string()]
    );
}
