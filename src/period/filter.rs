// Range filtering: select the records of one comparison period.

use serde::Serialize;
use tracing::debug;

use super::DateRange;
use crate::error::{AnalysisError, Result};
use crate::table::Record;

/// Records selected for one period, with the range they were selected by.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredPeriod {
    /// The raw range token, kept as the period's display label
    pub label: String,
    pub range: DateRange,
    /// Matching records, in their original relative order
    pub records: Vec<Record>,
    pub count: usize,
    /// Calendar span of the range bounds, not of the matched data
    pub span_days: u32,
}

impl FilteredPeriod {
    pub fn combined_texts(&self) -> Vec<String> {
        self.records.iter().map(Record::combined_text).collect()
    }
}

/// Select records dated within the range described by `range_token`.
///
/// Fails with `EmptyRangeResult` when nothing matches.
pub fn filter(records: &[Record], range_token: &str) -> Result<FilteredPeriod> {
    let range = DateRange::parse(range_token)?;

    let subset: Vec<Record> = records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect();

    if subset.is_empty() {
        return Err(AnalysisError::EmptyRangeResult(range_token.to_string()));
    }

    debug!(
        range = %range,
        matched = subset.len(),
        total = records.len(),
        "Filtered records for period"
    );

    Ok(FilteredPeriod {
        label: range_token.to_string(),
        range,
        count: subset.len(),
        span_days: range.span_days(),
        records: subset,
    })
}
