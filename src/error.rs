// Error taxonomy for a two-period comparison.
//
// Everything except Collaborator is caused by user input (bad date tokens,
// malformed ranges, unreadable tables, empty matches) and is reported back
// as a readable client-side message. Collaborator errors wrap whatever the
// classifier, extractor or renderer produced and are treated as opaque.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias for comparison operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A date token matched none of the accepted shapes.
    #[error("Invalid date format: {0:?}. Use YYYY-MM-DD, YYYY/MM/DD or 8-digit YYYYMMDD")]
    InvalidDateFormat(String),

    /// A range token did not split into exactly two dates.
    #[error("Invalid range {0:?}: expected two dates separated by a comma, e.g. 2025-01-01,2025-01-31")]
    InvalidRangeToken(String),

    /// The range start lies after its end.
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRangeOrder { start: NaiveDate, end: NaiveDate },

    /// The range matched zero records.
    #[error("No comments found in the date range {0:?}")]
    EmptyRangeResult(String),

    /// The input table was missing, malformed or not UTF-8.
    #[error("Failed to read comment table: {0}")]
    TableRead(String),

    /// Sentiment classifier, keyword extractor, topic modeler or chart renderer failure.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl AnalysisError {
    /// True when the failure stems from user input rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalysisError::Collaborator(_))
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(e: csv::Error) -> Self {
        AnalysisError::TableRead(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        assert!(AnalysisError::InvalidDateFormat("x".into()).is_client_error());
        assert!(AnalysisError::InvalidRangeToken("x".into()).is_client_error());
        assert!(AnalysisError::EmptyRangeResult("x".into()).is_client_error());
        assert!(AnalysisError::TableRead("x".into()).is_client_error());
    }

    #[test]
    fn test_collaborator_error_is_not_client_error() {
        let err: AnalysisError = anyhow::anyhow!("inference failed").into();
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "inference failed");
    }

    #[test]
    fn test_date_format_message_names_token() {
        let err = AnalysisError::InvalidDateFormat("2025-13-01".into());
        assert!(err.to_string().contains("2025-13-01"));
    }
}
