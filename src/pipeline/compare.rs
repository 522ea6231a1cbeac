// Two-period comparison pipeline.
//
// Given a comment table and two range tokens, this pipeline:
// 1. Filters the records for each period
// 2. Classifies sentiment per period in one batched call each
// 3. Counts keyword phrases per period and ranks their change
// 4. Optionally models topics per period and measures their overlap
// 5. Renders the comparison chart and assembles the report
//
// Steps run strictly in order and the first failure aborts the run.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::report::{PeriodSummary, Report};
use crate::chart::ChartRenderer;
use crate::error::{AnalysisError, Result};
use crate::keywords::frequency::{compare, extract_frequencies};
use crate::keywords::traits::KeywordExtractor;
use crate::period::filter::{filter, FilteredPeriod};
use crate::sentiment::tally::{Aggregation, SentimentCounts};
use crate::sentiment::traits::SentimentClassifier;
use crate::table::Record;
use crate::topics::clusters::TopicCluster;
use crate::topics::overlap::topic_overlap;
use crate::topics::traits::TopicModeler;

/// How the finished report is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Terminal summary, chart written to a file
    Displayed,
    /// JSON report with the chart embedded as base64
    #[default]
    Encoded,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub include_topics: bool,
    pub aggregation: Aggregation,
    pub output_mode: OutputMode,
    /// Keyword candidates requested per comment
    pub keywords_per_text: usize,
    /// Keyword deltas kept in the report
    pub top_deltas: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            include_topics: false,
            aggregation: Aggregation::Counts,
            output_mode: OutputMode::Encoded,
            keywords_per_text: 20,
            top_deltas: 5,
        }
    }
}

/// The external models a comparison depends on.
pub struct Collaborators<'a> {
    pub classifier: &'a dyn SentimentClassifier,
    pub extractor: &'a dyn KeywordExtractor,
    pub topics: &'a dyn TopicModeler,
    pub renderer: &'a dyn ChartRenderer,
}

/// Compare the comments of two date ranges.
pub async fn compare_two_periods(
    collaborators: &Collaborators<'_>,
    options: &PipelineOptions,
    records: &[Record],
    range_token1: &str,
    range_token2: &str,
) -> Result<Report> {
    let period1 = filter(records, range_token1)?;
    let period2 = filter(records, range_token2)?;

    info!(
        period1 = %period1.range,
        count1 = period1.count,
        period2 = %period2.range,
        count2 = period2.count,
        "Comparing periods"
    );

    let texts1 = period1.combined_texts();
    let texts2 = period2.combined_texts();

    let counts1 = classify(collaborators.classifier, &texts1).await?;
    let counts2 = classify(collaborators.classifier, &texts2).await?;

    let freq1 = extract_frequencies(collaborators.extractor, &texts1, options.keywords_per_text)?;
    let freq2 = extract_frequencies(collaborators.extractor, &texts2, options.keywords_per_text)?;
    let mut top_keywords = compare(&freq1, &freq2);
    top_keywords.truncate(options.top_deltas);

    let (topics1, topics2) = if options.include_topics {
        (
            Some(collaborators.topics.model(&texts1)?),
            Some(collaborators.topics.model(&texts2)?),
        )
    } else {
        (None, None)
    };
    let overlap = match (&topics1, &topics2) {
        (Some(a), Some(b)) => Some(topic_overlap(a, b)),
        _ => None,
    };

    let summary1 = summarize(period1, counts1, options.aggregation, topics1);
    let summary2 = summarize(period2, counts2, options.aggregation, topics2);

    let chart = collaborators.renderer.render(&summary1, &summary2)?;

    info!(
        keywords = top_keywords.len(),
        chart_bytes = chart.bytes.len(),
        "Comparison complete"
    );

    Ok(Report {
        top_keywords,
        count1: summary1.count,
        count2: summary2.count,
        period1: summary1,
        period2: summary2,
        topic_overlap: overlap,
        chart,
    })
}

/// One batched classifier call, tallied.
async fn classify(
    classifier: &dyn SentimentClassifier,
    texts: &[String],
) -> Result<SentimentCounts> {
    let labels = classifier.classify_batch(texts).await?;
    if labels.len() != texts.len() {
        return Err(AnalysisError::Collaborator(anyhow::anyhow!(
            "Classifier returned {} labels for {} texts",
            labels.len(),
            texts.len()
        )));
    }
    Ok(SentimentCounts::tally(&labels))
}

fn summarize(
    period: FilteredPeriod,
    counts: SentimentCounts,
    aggregation: Aggregation,
    topics: Option<Vec<TopicCluster>>,
) -> PeriodSummary {
    PeriodSummary {
        label: period.label,
        range: period.range,
        count: period.count,
        span_days: period.span_days,
        sentiment_counts: counts,
        sentiment: counts.distribution(aggregation),
        topics,
    }
}
