use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::qa::engine::answer_for_document;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub document_id: i64,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// POST /api/qa/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    answer_document(&state, req.document_id, &req.question)
        .await
        .map(Json)
}

/// POST /api/qa/:id
pub async fn handle_ask_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    answer_document(&state, id, &req.question).await.map(Json)
}

async fn answer_document(
    state: &AppState,
    document_id: i64,
    question: &str,
) -> Result<AnswerResponse, AppError> {
    let document = state
        .documents
        .get(document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let answer = answer_for_document(FsPath::new(&document.file_path), question)
        .await
        .map_err(|e| AppError::Processing(format!("Error processing question: {e}")))?;

    info!("Answered question for document {document_id}");
    Ok(AnswerResponse { answer })
}
