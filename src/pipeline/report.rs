// Comparison report: the result of one two-period run.

use serde::Serialize;

use crate::chart::ChartImage;
use crate::keywords::frequency::FrequencyDelta;
use crate::period::DateRange;
use crate::sentiment::tally::{SentimentCounts, SentimentDistribution};
use crate::topics::clusters::TopicCluster;

/// Aggregates for one period, as charted and reported.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    /// The range token as the user typed it
    pub label: String,
    pub range: DateRange,
    pub count: usize,
    pub span_days: u32,
    pub sentiment_counts: SentimentCounts,
    /// Counts or percentages, per the run's aggregation mode
    pub sentiment: SentimentDistribution,
    /// Present only when topic modeling was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<TopicCluster>>,
}

impl PeriodSummary {
    pub fn average_daily(&self) -> f64 {
        self.count as f64 / self.span_days.max(1) as f64
    }

    pub fn average_daily_negative(&self) -> f64 {
        self.sentiment_counts.negative as f64 / self.span_days.max(1) as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Largest increases from period 1 to period 2, best first
    pub top_keywords: Vec<FrequencyDelta>,
    pub count1: usize,
    pub count2: usize,
    pub period1: PeriodSummary,
    pub period2: PeriodSummary,
    /// Weighted Jaccard of the two periods' topics, when topics were modeled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_overlap: Option<f64>,
    #[serde(skip)]
    pub chart: ChartImage,
}

impl Report {
    /// JSON form of the report with the chart embedded as base64.
    pub fn to_encoded_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "image".to_string(),
                serde_json::Value::String(self.chart.to_base64()),
            );
            obj.insert(
                "image_mime_type".to_string(),
                serde_json::Value::String(self.chart.mime_type.clone()),
            );
        }
        Ok(value)
    }
}
