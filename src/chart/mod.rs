// Chart rendering: trait-based abstraction over the comparison figure.
//
// The renderer receives the two period summaries and returns an opaque
// image artifact. The bundled implementation draws SVG with plotters.

pub mod svg;

use anyhow::Result;
use base64::Engine;
use serde::Serialize;

use crate::pipeline::report::PeriodSummary;

/// An encoded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ChartImage {
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/svg+xml" => "svg",
            "image/png" => "png",
            _ => "bin",
        }
    }
}

/// Per-day rates and their change between periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthMetrics {
    pub average_daily1: f64,
    pub average_daily2: f64,
    /// Change in average comments per day
    pub total_growth: f64,
    /// Change in average negative comments per day
    pub negative_growth: f64,
}

impl GrowthMetrics {
    pub fn between(period1: &PeriodSummary, period2: &PeriodSummary) -> Self {
        let average_daily1 = period1.average_daily();
        let average_daily2 = period2.average_daily();
        Self {
            average_daily1,
            average_daily2,
            total_growth: average_daily2 - average_daily1,
            negative_growth: period2.average_daily_negative() - period1.average_daily_negative(),
        }
    }
}

/// Trait for drawing the two-period comparison figure.
pub trait ChartRenderer {
    fn render(&self, period1: &PeriodSummary, period2: &PeriodSummary) -> Result<ChartImage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::DateRange;
    use crate::sentiment::tally::{Aggregation, SentimentCounts};

    fn summary(token: &str, count: usize, negative: u32) -> PeriodSummary {
        let range = DateRange::parse(token).unwrap();
        let counts = SentimentCounts {
            positive: count as u32 - negative,
            negative,
            neutral: 0,
        };
        PeriodSummary {
            label: token.to_string(),
            range,
            count,
            span_days: range.span_days(),
            sentiment_counts: counts,
            sentiment: counts.distribution(Aggregation::Counts),
            topics: None,
        }
    }

    #[test]
    fn test_growth_metrics() {
        // 10 comments over 2 days, then 30 over 3 days
        let p1 = summary("2025-01-01,2025-01-02", 10, 4);
        let p2 = summary("2025-02-01,2025-02-03", 30, 3);
        let g = GrowthMetrics::between(&p1, &p2);

        assert!((g.average_daily1 - 5.0).abs() < 1e-9);
        assert!((g.average_daily2 - 10.0).abs() < 1e-9);
        assert!((g.total_growth - 5.0).abs() < 1e-9);
        assert!((g.negative_growth - (1.0 - 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_base64_and_extension() {
        let image = ChartImage {
            mime_type: "image/svg+xml".to_string(),
            bytes: b"<svg/>".to_vec(),
        };
        assert_eq!(image.to_base64(), "PHN2Zy8+");
        assert_eq!(image.extension(), "svg");
    }
}
