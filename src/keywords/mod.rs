// Keyword extraction and cross-period frequency comparison.
//
// The KeywordExtractor trait hides the statistical extractor (YAKE by
// default). Frequency tables and their comparison are plain counting and
// live in `frequency`.

pub mod frequency;
pub mod traits;
pub mod yake;
