use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::sentiment::download::{self, DEFAULT_MODEL_URL};
use crate::sentiment::onnx::DEFAULT_MAX_TOKENS;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override the keyword tuning values per run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the ONNX sentiment model files
    pub model_dir: PathBuf,
    /// Base URL the model files are downloaded from
    pub model_url: String,
    /// Keyword candidates requested per comment
    pub keywords_per_text: usize,
    /// Keyword deltas kept in a report
    pub top_deltas: usize,
    /// Token limit per comment before truncation
    pub max_tokens: usize,
}

impl Config {
    /// Load configuration from environment variables. Every value has a default.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("REVIEW_PULSE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| download::default_model_dir());

        Ok(Self {
            model_dir,
            model_url: env::var("REVIEW_PULSE_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string()),
            keywords_per_text: parse_var("REVIEW_PULSE_KEYWORDS_PER_TEXT", 20)?,
            top_deltas: parse_var("REVIEW_PULSE_TOP_DELTAS", 5)?,
            max_tokens: parse_var("REVIEW_PULSE_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        })
    }

    /// Check that the sentiment model files are in place.
    /// Call this before building the ONNX classifier.
    pub fn require_model(&self) -> Result<()> {
        if !download::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "Sentiment model files not found in {}\n\
                 Run `review-pulse download-model` to download them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}

/// Read a positive integer variable, falling back to `default` when unset.
fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => {
            let value: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a positive integer, got {raw:?}"))?;
            if value == 0 {
                anyhow::bail!("{name} must be greater than zero");
            }
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        assert_eq!(parse_var("REVIEW_PULSE_TEST_UNSET_VARIABLE", 7).unwrap(), 7);
    }

    #[test]
    fn test_require_model_missing_dir() {
        let config = Config {
            model_dir: PathBuf::from("/nonexistent/review-pulse-models"),
            model_url: DEFAULT_MODEL_URL.to_string(),
            keywords_per_text: 20,
            top_deltas: 5,
            max_tokens: DEFAULT_MAX_TOKENS,
        };
        let err = config.require_model().unwrap_err().to_string();
        assert!(err.contains("download-model"));
    }
}
