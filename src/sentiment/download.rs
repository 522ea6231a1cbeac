// Model download helper for the ONNX sentiment model.
//
// Fetches the tokenizer and the quantized ONNX export of the
// twitter-roberta sentiment model from HuggingFace. Files are stored in a
// platform-appropriate directory (~/.local/share/review-pulse/models/ on
// Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Default HuggingFace repo holding the ONNX export.
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/Xenova/twitter-roberta-base-sentiment-latest/resolve/main";

/// Local file names inside the model directory.
pub const MODEL_FILE: &str = "model_quantized.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Remote paths relative to the repo base URL.
const REMOTE_MODEL_FILE: &str = "onnx/model_quantized.onnx";
const REMOTE_TOKENIZER_FILE: &str = "tokenizer.json";

/// Returns the default directory for storing model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("review-pulse")
        .join("models")
}

/// Check whether both required model files exist.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Download the tokenizer and model into `dir`, skipping files that exist.
pub async fn download_model(base_url: &str, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let base_url = base_url.trim_end_matches('/');

    for (remote, local, show_progress) in [
        (REMOTE_TOKENIZER_FILE, TOKENIZER_FILE, false),
        (REMOTE_MODEL_FILE, MODEL_FILE, true),
    ] {
        let dest = dir.join(local);
        if dest.exists() {
            info!(file = local, "Model file already exists, skipping");
            println!("  {local} (already exists)");
            continue;
        }
        println!("  Downloading {local}...");
        download_file(&format!("{base_url}/{remote}"), &dest, show_progress).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = if show_progress {
        let pb = match response.content_length() {
            Some(size) => {
                let pb = ProgressBar::new(size);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .context("Invalid progress template")?
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("    {spinner} {bytes}")
                        .context("Invalid progress template")?,
                );
                pb
            }
        };
        Some(pb)
    } else {
        None
    };

    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        bytes.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(bytes.len() as u64);
        }
    }

    // Write to a temp name first so an interrupted download is not mistaken
    // for a complete model on the next run
    let partial = dest.with_extension("part");
    std::fs::write(&partial, &bytes)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move {} into place", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
