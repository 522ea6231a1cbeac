// Local ONNX sentiment classifier using the twitter-roberta sentiment model.
//
// Runs entirely on the local CPU with no network dependency once
// the model is downloaded. The model head emits three logits per text
// (negative, neutral, positive); the highest logit wins.
//
// Texts are truncated to the model's 512-token window at tokenization time.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::download::{MODEL_FILE, TOKENIZER_FILE};
use super::traits::{SentimentClassifier, SentimentLabel};

/// Longest token sequence the RoBERTa encoder accepts.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Texts per forward pass. Keeps the padded [batch, 512] tensors bounded.
const INFERENCE_CHUNK: usize = 32;

/// RoBERTa pad token id.
const PAD_TOKEN_ID: i64 = 1;

/// Local ONNX-based sentiment classifier. Holds the model session and
/// tokenizer behind Arc so inference can run on spawn_blocking.
pub struct OnnxSentimentClassifier {
    // ort::Session::run takes &mut self, hence the Mutex
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxSentimentClassifier {
    /// Load the ONNX model and tokenizer from `model_dir`, truncating inputs
    /// to `max_tokens`.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in `model_dir`.
    /// Call `download::download_model()` first if they don't.
    pub fn load(model_dir: &Path, max_tokens: usize) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `review-pulse download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `review-pulse download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_tokens,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;
        // Padding is done by hand per chunk
        tokenizer.with_padding(None);

        debug!(
            model_dir = %model_dir.display(),
            max_tokens,
            "Loaded ONNX sentiment model"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl SentimentClassifier for OnnxSentimentClassifier {
    async fn classify_text(&self, text: &str) -> Result<SentimentLabel> {
        let mut labels = self.classify_batch(&[text.to_string()]).await?;
        labels
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Classifier returned no label"))
    }

    /// Batch inference: tokenize, run forward passes over fixed-size chunks,
    /// and take the argmax of each row of logits.
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<SentimentLabel>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut labels = Vec::with_capacity(texts.len());
            for chunk in texts.chunks(INFERENCE_CHUNK) {
                labels.extend(run_chunk(&session, &tokenizer, chunk)?);
            }
            Ok(labels)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

fn run_chunk(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    texts: &[String],
) -> Result<Vec<SentimentLabel>> {
    let encodings: Vec<_> = texts
        .iter()
        .map(|t| {
            tokenizer
                .encode(t.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

    // Shape: [batch_size, max_len], right-padded
    let mut input_ids: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let seq_len = enc.get_ids().len();
        input_ids.extend(enc.get_ids().iter().map(|&id| id as i64));
        attention_mask.extend(enc.get_attention_mask().iter().map(|&m| m as i64));
        for _ in seq_len..max_len {
            input_ids.push(PAD_TOKEN_ID);
            attention_mask.push(0);
        }
    }

    let shape = [batch_size as i64, max_len as i64];
    let input_ids_tensor =
        Tensor::from_array((shape, input_ids)).context("Failed to create input_ids tensor")?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
        .context("Failed to create attention_mask tensor")?;

    let logits = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            })
            .context("ONNX inference failed")?;

        // Output shape: [batch_size, 3] raw logits
        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract output tensor")?;

        data.to_vec()
    };

    labels_from_logits(&logits, batch_size)
}

/// Map a flat [batch, 3] logit buffer to one label per row.
fn labels_from_logits(logits: &[f32], batch_size: usize) -> Result<Vec<SentimentLabel>> {
    let classes = SentimentLabel::CLASS_ORDER.len();
    if logits.len() != batch_size * classes {
        anyhow::bail!(
            "Unexpected logits length {} for batch of {} ({} classes)",
            logits.len(),
            batch_size,
            classes
        );
    }

    logits
        .chunks_exact(classes)
        .map(|row| {
            let idx = argmax(row);
            SentimentLabel::from_class_index(idx)
                .ok_or_else(|| anyhow::anyhow!("Class index {idx} out of range"))
        })
        .collect()
}

/// Index of the largest value; first one wins on ties.
fn argmax(row: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 2.0, -1.0]), 1);
        assert_eq!(argmax(&[-0.5, -2.0, 3.5]), 2);
    }

    #[test]
    fn test_argmax_ties_take_first() {
        assert_eq!(argmax(&[1.0, 1.0, 0.0]), 0);
    }

    #[test]
    fn test_labels_from_logits() {
        let logits = vec![
            2.1, 0.3, -1.0, // negative
            -0.2, 1.4, 0.1, // neutral
            -1.5, 0.0, 3.2, // positive
        ];
        let labels = labels_from_logits(&logits, 3).unwrap();
        assert_eq!(
            labels,
            vec![
                SentimentLabel::Negative,
                SentimentLabel::Neutral,
                SentimentLabel::Positive
            ]
        );
    }

    #[test]
    fn test_labels_from_logits_length_mismatch() {
        assert!(labels_from_logits(&[0.0; 5], 2).is_err());
    }

    #[test]
    fn test_load_missing_model_fails() {
        let dir = std::env::temp_dir().join("review-pulse-test-no-model");
        assert!(OnnxSentimentClassifier::load(&dir, DEFAULT_MAX_TOKENS).is_err());
    }
}
