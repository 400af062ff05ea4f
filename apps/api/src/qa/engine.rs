use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::documents::storage::content_path;
use crate::qa::extractors::{find_current_job, find_education, find_email, find_name, find_phone};
use crate::qa::intent::Intent;
use crate::qa::search::rank_sentences;

/// Returned when a document has no extracted text on disk.
pub const MISSING_CONTENT: &str = "Document content not found. Please re-upload the document.";

/// Routes a question to exactly one answerer. Pure: same inputs, same answer.
pub fn answer(text: &str, question: &str) -> String {
    let intent = Intent::classify(question);
    debug!(?intent, "Dispatching question");

    match intent {
        Intent::Name => find_name(text),
        Intent::Email => find_email(text),
        Intent::Phone => find_phone(text),
        Intent::CurrentJob => find_current_job(text),
        Intent::Education => find_education(text),
        Intent::General => rank_sentences(text, &question.trim().to_lowercase()),
    }
}

/// Loads the extracted text stored beside `pdf_path` and answers the question.
/// A missing text file yields [`MISSING_CONTENT`]; other I/O failures propagate.
pub async fn answer_for_document(pdf_path: &Path, question: &str) -> std::io::Result<String> {
    let text_path = content_path(pdf_path);
    let text = match tokio::fs::read_to_string(&text_path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No extracted text at {}", text_path.display());
            return Ok(MISSING_CONTENT.to_string());
        }
        Err(e) => return Err(e),
    };

    Ok(answer(&text, question))
}
