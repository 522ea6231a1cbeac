// YAKE keyword extraction via the `keyword_extraction` crate.
//
// YAKE is unsupervised and works per document, so each comment is scored
// on its own. Candidates are up to three tokens long, and candidates more
// than 90% similar to a better-ranked one are dropped.

use anyhow::Result;
use keyword_extraction::yake::{Yake, YakeParams};
use stop_words::{get, LANGUAGE};

use super::traits::KeywordExtractor;

/// Longest candidate phrase, in tokens.
pub const MAX_NGRAM: usize = 3;

/// Similarity above which a lower-ranked candidate is discarded.
pub const DEDUP_THRESHOLD: f32 = 0.9;

/// Co-occurrence window used for the term relatedness feature.
const WINDOW_SIZE: usize = 1;

pub struct YakeExtractor {
    stop_words: Vec<String>,
    pub max_ngram: usize,
    pub dedup_threshold: f32,
}

impl Default for YakeExtractor {
    fn default() -> Self {
        Self::english()
    }
}

impl YakeExtractor {
    /// English stop words, n-grams up to 3, dedup at 0.9 similarity.
    pub fn english() -> Self {
        Self {
            stop_words: get(LANGUAGE::English),
            max_ngram: MAX_NGRAM,
            dedup_threshold: DEDUP_THRESHOLD,
        }
    }
}

impl KeywordExtractor for YakeExtractor {
    fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        if top_n == 0 || text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let params = YakeParams::All(
            text,
            &self.stop_words,
            None,
            self.dedup_threshold,
            self.max_ngram,
            WINDOW_SIZE,
        );
        let yake = Yake::new(params);

        Ok(yake.get_ranked_keywords(top_n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_nothing() {
        let extractor = YakeExtractor::english();
        assert!(extractor.extract("   ", 20).unwrap().is_empty());
    }

    #[test]
    fn test_zero_top_n_yields_nothing() {
        let extractor = YakeExtractor::english();
        assert!(extractor
            .extract("the new booster pack has amazing rare cards", 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_respects_top_n() {
        let extractor = YakeExtractor::english();
        let text = "the new booster pack has amazing rare cards and the trading \
                    feature finally lets players swap duplicate cards with friends";
        let keywords = extractor.extract(text, 3).unwrap();
        assert!(keywords.len() <= 3);
    }

    #[test]
    fn test_extracts_candidates_from_comment() {
        let extractor = YakeExtractor::english();
        let text = "server lag ruined ranked matches again, the server lag is constant";
        let keywords = extractor.extract(text, 5).unwrap();
        assert!(!keywords.is_empty());
        assert!(keywords.iter().all(|k| k.split_whitespace().count() <= MAX_NGRAM));
    }
}
