// Convert spreadsheet exports into the CSV layout the loader expects.
//
// Store review exports arrive as UTF-16LE, tab-separated files. This
// rewrites them as UTF-8, comma-separated, with every field quoted, keeping
// the header row and column order as they are.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{AnalysisError, Result};

/// Decode UTF-16LE bytes, dropping a leading byte-order mark if present.
pub fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(AnalysisError::TableRead(
            "UTF-16LE input has an odd number of bytes".to_string(),
        ));
    }

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let text: String = char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| AnalysisError::TableRead(format!("invalid UTF-16LE input: {e}")))?;

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Rewrite tab-separated text as fully quoted CSV. Returns the CSV text
/// and the number of data rows (header excluded).
pub fn tsv_to_quoted_csv(tsv: &str) -> Result<(String, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(tsv.as_bytes());

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .flexible(true)
        .from_writer(Vec::new());

    let mut rows = 0usize;
    for record in reader.records() {
        writer.write_record(&record?)?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalysisError::TableRead(format!("failed to flush CSV: {e}")))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| AnalysisError::TableRead(format!("CSV output not UTF-8: {e}")))?;

    Ok((csv, rows.saturating_sub(1)))
}

/// Standardize an export file on disk. `input` and `output` may be the same path.
pub fn standardize_file(input: &Path, output: &Path) -> Result<usize> {
    let bytes = fs::read(input)
        .map_err(|e| AnalysisError::TableRead(format!("{}: {e}", input.display())))?;
    let text = decode_utf16le(&bytes)?;
    let (csv, rows) = tsv_to_quoted_csv(&text)?;
    fs::write(output, csv)
        .map_err(|e| AnalysisError::TableRead(format!("{}: {e}", output.display())))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        rows,
        "Standardized comment table"
    );
    Ok(rows)
}
