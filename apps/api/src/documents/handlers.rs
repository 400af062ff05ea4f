use std::io::ErrorKind;
use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::documents::processing::process_pdf;
use crate::documents::storage::content_path;
use crate::errors::AppError;
use crate::models::document::{DocumentResponse, NewDocument};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: i64,
    pub filename: String,
}

/// POST /api/documents/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (filename, data) = read_upload_field(&mut multipart).await?;

    if !filename.ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }

    let pdf_path = state.storage.path_for_upload(&filename);
    save_upload(&pdf_path, &data).await?;
    info!("Stored upload '{filename}' at {}", pdf_path.display());

    if let Err(e) = process_pdf(&pdf_path).await {
        warn!("Extraction failed for {}: {e:#}", pdf_path.display());
        discard_upload(&pdf_path).await;
        return Err(AppError::Processing(format!("Error processing PDF: {e:#}")));
    }

    let inserted = state
        .documents
        .insert(NewDocument {
            filename,
            file_path: pdf_path.to_string_lossy().into_owned(),
        })
        .await;
    let document = match inserted {
        Ok(document) => document,
        Err(e) => {
            discard_upload(&pdf_path).await;
            return Err(e);
        }
    };
    info!("Recorded document {} ({})", document.id, document.filename);

    Ok(Json(UploadResponse {
        id: document.id,
        filename: document.filename,
    }))
}

/// GET /api/documents/
pub async fn handle_list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let documents = state.documents.list().await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

/// GET /api/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = state
        .documents
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
    Ok(Json(document.into()))
}

async fn read_upload_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok((filename, data));
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// Removes a stored PDF and its extracted text directory, if present.
async fn discard_upload(pdf_path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(pdf_path).await {
        warn!("Failed to remove {}: {e}", pdf_path.display());
    }
    if let Some(text_dir) = content_path(pdf_path).parent() {
        match tokio::fs::remove_dir_all(text_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {e}", text_dir.display()),
        }
    }
}

async fn save_upload(path: &FsPath, data: &Bytes) -> Result<(), AppError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to save {}: {e}", path.display())))
}
