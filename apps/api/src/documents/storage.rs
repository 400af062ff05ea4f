use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

/// File name of the extracted text, stored in a directory named after the PDF.
pub const CONTENT_FILE_NAME: &str = "content.txt";

/// Resolves where uploaded PDFs live on local disk.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    upload_dir: PathBuf,
}

impl UploadStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Creates the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .with_context(|| format!("Failed to create upload dir {}", self.upload_dir.display()))
    }

    /// A unique path for a new upload: `{upload_dir}/{uuid}_{filename}`.
    pub fn path_for_upload(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);
        self.upload_dir.join(format!("{}_{}", Uuid::new_v4(), name))
    }
}

/// `uploads/abc_cv.pdf` → `uploads/abc_cv/content.txt`
pub fn content_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("").join(CONTENT_FILE_NAME)
}
