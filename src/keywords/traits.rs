// Keyword extractor trait: swap-ready abstraction.
//
// Like the SentimentClassifier trait, this lets the comparison pipeline run
// against any extractor, including deterministic stubs in tests.

use anyhow::Result;

/// Trait for pulling ranked keyword phrases out of a single text.
pub trait KeywordExtractor {
    /// Return up to `top_n` phrases for `text`, best first.
    fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>>;
}
