// Sentiment classifier trait: the swap-ready abstraction.
//
// The default implementation runs the 3-class twitter-roberta sentiment
// model locally through ONNX. The pipeline only sees this trait, so tests
// inject fixed classifiers and no model handle lives in global state.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// The three sentiment classes, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Class index order of the model head: 0 = Negative, 1 = Neutral, 2 = Positive.
    pub const CLASS_ORDER: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::CLASS_ORDER.get(index).copied()
    }

    /// Map a raw model label (`LABEL_0`..`LABEL_2`, or a class name) to a label.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "label_0" | "negative" => Some(SentimentLabel::Negative),
            "label_1" | "neutral" => Some(SentimentLabel::Neutral),
            "label_2" | "positive" => Some(SentimentLabel::Positive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for labelling text sentiment. Async because inference is offloaded
/// from the runtime.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a single text.
    async fn classify_text(&self, text: &str) -> Result<SentimentLabel>;

    /// Classify multiple texts, returning labels in the same order.
    /// Default implementation calls classify_text sequentially; backends
    /// can override for batching.
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<SentimentLabel>> {
        let mut labels = Vec::with_capacity(texts.len());
        for text in texts {
            labels.push(self.classify_text(text).await?);
        }
        Ok(labels)
    }
}
