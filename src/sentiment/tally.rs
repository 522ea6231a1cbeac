// Per-period sentiment tallies and their count/percentage views.

use serde::{Deserialize, Serialize};

use super::traits::SentimentLabel;

/// How sentiment is aggregated for reporting and charting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Raw number of comments per label
    #[default]
    Counts,
    /// Share of the period's comments per label, 0-100
    Percentages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentCounts {
    pub fn tally(labels: &[SentimentLabel]) -> Self {
        let mut counts = Self::default();
        for label in labels {
            match label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }

    pub fn get(&self, label: SentimentLabel) -> u32 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn distribution(&self, aggregation: Aggregation) -> SentimentDistribution {
        let scale = |n: u32| match aggregation {
            Aggregation::Counts => n as f64,
            Aggregation::Percentages => {
                let total = self.total();
                if total == 0 {
                    0.0
                } else {
                    n as f64 * 100.0 / total as f64
                }
            }
        };

        SentimentDistribution {
            aggregation,
            positive: scale(self.positive),
            negative: scale(self.negative),
            neutral: scale(self.neutral),
        }
    }
}

/// Sentiment values as plotted: either counts or percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub aggregation: Aggregation,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}
