use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::documents::storage::content_path;

/// Extracts the text of a stored PDF and writes it to its `content.txt`.
/// Returns the path of the written text file.
pub async fn process_pdf(pdf_path: &Path) -> Result<PathBuf> {
    let bytes = tokio::fs::read(pdf_path)
        .await
        .with_context(|| format!("Failed to read {}", pdf_path.display()))?;

    // pdf-extract is CPU-bound and may panic on malformed input.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .context("PDF extraction task failed")?
        .map_err(|e| anyhow!("Failed to extract PDF text: {e}"))?;

    let text_path = content_path(pdf_path);
    if let Some(dir) = text_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    tokio::fs::write(&text_path, text.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", text_path.display()))?;

    info!(
        "Extracted {} chars from {} into {}",
        text.chars().count(),
        pdf_path.display(),
        text_path.display()
    );
    Ok(text_path)
}
