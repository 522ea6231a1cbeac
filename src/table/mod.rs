// Comment table: CSV loading into dated records.
//
// A table needs a date column and at least one of the title/content text
// columns. Column names default to Date/Title/Content but can be
// overridden for exports that use other headers (e.g. "date"/"review").

pub mod standardize;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::period::date;

/// Timestamp layouts accepted in the date column beyond the plain date shapes.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// One comment from the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Record {
    pub fn new(date: NaiveDate, title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            date,
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    /// Title followed directly by content, with missing fields as "".
    pub fn combined_text(&self) -> String {
        let mut text = self.title.clone().unwrap_or_default();
        text.push_str(self.content.as_deref().unwrap_or(""));
        text
    }
}

/// Header names used to locate the record fields.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub date_column: String,
    pub title_column: String,
    pub content_column: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            date_column: "Date".to_string(),
            title_column: "Title".to_string(),
            content_column: "Content".to_string(),
        }
    }
}

/// Coverage statistics for a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub missing_titles: usize,
    pub missing_contents: usize,
}

/// Load a UTF-8 comma-separated comment table from disk.
pub fn load_csv(path: &Path, schema: &TableSchema) -> Result<Vec<Record>> {
    let file = File::open(path)
        .map_err(|e| AnalysisError::TableRead(format!("{}: {e}", path.display())))?;
    let records = read_records(file, schema)?;
    debug!(path = %path.display(), records = records.len(), "Loaded comment table");
    Ok(records)
}

/// Read records from any CSV source. Rows with an empty date cell are skipped.
pub fn read_records<R: Read>(source: R, schema: &TableSchema) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let date_idx = position(&schema.date_column).ok_or_else(|| {
        AnalysisError::TableRead(format!(
            "missing column {:?} (available: {:?})",
            schema.date_column,
            headers.iter().collect::<Vec<_>>()
        ))
    })?;
    let title_idx = position(&schema.title_column);
    let content_idx = position(&schema.content_column);
    if title_idx.is_none() && content_idx.is_none() {
        return Err(AnalysisError::TableRead(format!(
            "neither {:?} nor {:?} column present",
            schema.title_column, schema.content_column
        )));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1
        let line = i + 2;

        let cell = row.get(date_idx).unwrap_or("").trim();
        if cell.is_empty() {
            skipped += 1;
            continue;
        }
        let date = parse_cell_date(cell).ok_or_else(|| {
            AnalysisError::TableRead(format!("line {line}: unparseable date {cell:?}"))
        })?;

        let text_at = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        records.push(Record {
            date,
            title: text_at(title_idx),
            content: text_at(content_idx),
        });
    }

    if skipped > 0 {
        warn!(skipped, "Skipped rows with an empty date cell");
    }

    Ok(records)
}

/// Parse a date cell, discarding any time-of-day component.
pub fn parse_cell_date(cell: &str) -> Option<NaiveDate> {
    if let Ok(d) = date::normalize(cell) {
        return Some(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(cell)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Summarize date coverage and null counts. Returns None for an empty table.
pub fn summarize(records: &[Record]) -> Option<TableSummary> {
    let first_date = records.iter().map(|r| r.date).min()?;
    let last_date = records.iter().map(|r| r.date).max()?;
    Some(TableSummary {
        records: records.len(),
        first_date,
        last_date,
        missing_titles: records.iter().filter(|r| r.title.is_none()).count(),
        missing_contents: records.iter().filter(|r| r.content.is_none()).count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_combined_text_concatenates_without_separator() {
        let r = Record::new(date(2025, 1, 1), Some("Great"), Some("game"));
        assert_eq!(r.combined_text(), "Greatgame");
    }

    #[test]
    fn test_combined_text_nulls_are_empty() {
        assert_eq!(
            Record::new(date(2025, 1, 1), None, Some("only body")).combined_text(),
            "only body"
        );
        assert_eq!(Record::new(date(2025, 1, 1), None, None).combined_text(), "");
    }

    #[test]
    fn test_read_records_default_schema() {
        let csv = "Date,Title,Content\n\
                   2025-01-01,Love it,Best card game\n\
                   2025-01-02,,Servers are down again\n\
                   2025-02-01 13:45:00,Meh,\n";
        let records = read_records(csv.as_bytes(), &TableSchema::default()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title.as_deref(), Some("Love it"));
        assert_eq!(records[1].title, None);
        assert_eq!(records[2].date, date(2025, 2, 1));
        assert_eq!(records[2].content, None);
    }

    #[test]
    fn test_read_records_custom_schema_without_title() {
        let csv = "date,review\n2024-01-05,fun\n2024-01-06,boring\n";
        let schema = TableSchema {
            date_column: "date".into(),
            title_column: "title".into(),
            content_column: "review".into(),
        };
        let records = read_records(csv.as_bytes(), &schema).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].combined_text(), "boring");
    }

    #[test]
    fn test_missing_date_column_is_table_error() {
        let csv = "When,Title,Content\n2025-01-01,a,b\n";
        let err = read_records(csv.as_bytes(), &TableSchema::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::TableRead(_)));
    }

    #[test]
    fn test_missing_text_columns_is_table_error() {
        let csv = "Date,Score\n2025-01-01,5\n";
        assert!(read_records(csv.as_bytes(), &TableSchema::default()).is_err());
    }

    #[test]
    fn test_unparseable_date_reports_line() {
        let csv = "Date,Title,Content\n2025-01-01,a,b\nyesterday,c,d\n";
        let err = read_records(csv.as_bytes(), &TableSchema::default()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn test_empty_date_rows_skipped() {
        let csv = "Date,Title,Content\n,a,b\n2025-01-01,c,d\n";
        let records = read_records(csv.as_bytes(), &TableSchema::default()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_table_error() {
        let bytes: &[u8] = b"Date,Title,Content\n2025-01-01,\xff\xfe,b\n";
        let err = read_records(bytes, &TableSchema::default()).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_parse_cell_date_shapes() {
        assert_eq!(parse_cell_date("20250101"), Some(date(2025, 1, 1)));
        assert_eq!(parse_cell_date("2025/01/01"), Some(date(2025, 1, 1)));
        assert_eq!(parse_cell_date("2025-01-01T08:00:00"), Some(date(2025, 1, 1)));
        assert_eq!(parse_cell_date("2025-01-01T23:30:00+00:00"), Some(date(2025, 1, 1)));
        assert_eq!(parse_cell_date("not a date"), None);
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            Record::new(date(2025, 1, 3), Some("a"), None),
            Record::new(date(2025, 1, 1), None, Some("b")),
        ];
        let s = summarize(&records).unwrap();
        assert_eq!(s.records, 2);
        assert_eq!(s.first_date, date(2025, 1, 1));
        assert_eq!(s.last_date, date(2025, 1, 3));
        assert_eq!(s.missing_titles, 1);
        assert_eq!(s.missing_contents, 1);
        assert!(summarize(&[]).is_none());
    }
}
