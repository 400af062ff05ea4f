pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::qa::handlers as qa;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/documents", get(documents::handle_list_documents))
        .route("/api/documents/", get(documents::handle_list_documents))
        .route("/api/documents/upload", post(documents::handle_upload))
        .route("/api/documents/:id", get(documents::handle_get_document))
        // Question answering
        .route("/api/qa/ask", post(qa::handle_ask))
        .route("/api/qa/:id", post(qa::handle_ask_by_id))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::documents::repository::memory::InMemoryDocumentStore;
    use crate::documents::repository::DocumentStore;
    use crate::documents::storage::{content_path, UploadStorage};
    use crate::errors::AppError;
    use crate::models::document::{DocumentRow, NewDocument};
    use crate::qa::engine::MISSING_CONTENT;

    const BOUNDARY: &str = "docqa-test-boundary";

    fn test_app(upload_dir: &Path) -> (Router, Arc<InMemoryDocumentStore>) {
        let store = Arc::new(InMemoryDocumentStore::default());
        (test_app_with_store(upload_dir, store.clone()), store)
    }

    fn test_app_with_store(upload_dir: &Path, store: Arc<dyn DocumentStore>) -> Router {
        let state = AppState {
            documents: store,
            storage: UploadStorage::new(upload_dir),
            config: Config {
                database_url: "postgres://unused".to_string(),
                upload_dir: upload_dir.display().to_string(),
                port: 0,
                max_upload_mb: 1,
                rust_log: "info".to_string(),
            },
        };
        build_router(state)
    }

    /// Store whose inserts always fail, as if the database were unreachable.
    struct UnavailableStore;

    #[async_trait::async_trait]
    impl DocumentStore for UnavailableStore {
        async fn insert(&self, _document: NewDocument) -> Result<DocumentRow, AppError> {
            Err(AppError::Internal(anyhow::anyhow!("database unavailable")))
        }

        async fn list(&self) -> Result<Vec<DocumentRow>, AppError> {
            Ok(vec![])
        }

        async fn get(&self, _id: i64) -> Result<Option<DocumentRow>, AppError> {
            Ok(None)
        }
    }

    /// Builds a one-page PDF with each line drawn in Helvetica.
    fn single_page_pdf(lines: &[&str]) -> Vec<u8> {
        let body = lines
            .iter()
            .map(|line| format!("({line}) Tj"))
            .collect::<Vec<_>>()
            .join(" 0 -14 Td ");
        let content = format!("BT /F1 12 Tf 72 720 Td {body} ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
        }
        let xref_offset = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.into_bytes()
    }

    fn stored_pdfs(dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_file())
            .collect()
    }

    fn multipart_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/documents/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Registers a document whose extracted text already exists on disk.
    async fn seed_document(store: &InMemoryDocumentStore, dir: &Path, text: Option<&str>) -> i64 {
        let pdf_path = dir.join("seed_resume.pdf");
        if let Some(text) = text {
            let text_path = content_path(&pdf_path);
            std::fs::create_dir_all(text_path.parent().unwrap()).unwrap();
            std::fs::write(text_path, text).unwrap();
        }
        store
            .insert(NewDocument {
                filename: "resume.pdf".to_string(),
                file_path: pdf_path.display().to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(dir.path());
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let response = app
            .oneshot(multipart_request("file", "notes.txt", b"hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Only PDF files are allowed");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_requires_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(dir.path());
        let response = app
            .oneshot(multipart_request("attachment", "cv.pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_extraction_removes_upload() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let response = app
            .oneshot(multipart_request("file", "broken.pdf", b"not really a pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Error processing PDF"), "message was {message}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_get_documents() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let id = seed_document(&store, dir.path(), None).await;

        let response = app
            .clone()
            .oneshot(get_request("/api/documents/"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let docs = body.as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["filename"], "resume.pdf");
        assert!(docs[0]["title"].is_null());
        assert!(docs[0].get("file_path").is_none());

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/documents/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], id);

        let response = app.oneshot(get_request("/api/documents/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ask_answers_from_extracted_text() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let id = seed_document(
            &store,
            dir.path(),
            Some("Jane Doe\nContact: jane.doe@example.com and more\nCall 555-123-4567 now\n"),
        )
        .await;

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/qa/ask",
                json!({"document_id": id, "question": "What is my email address?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["answer"],
            "The email address is: jane.doe@example.com"
        );

        let response = app
            .oneshot(json_request(
                &format!("/api/qa/{id}"),
                json!({"question": "phone number?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["answer"],
            "The phone number is: 555-123-4567"
        );
    }

    #[tokio::test]
    async fn test_ask_without_text_returns_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let id = seed_document(&store, dir.path(), None).await;

        let response = app
            .oneshot(json_request(
                &format!("/api/qa/{id}"),
                json!({"question": "Who am I?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["answer"], MISSING_CONTENT);
    }

    #[tokio::test]
    async fn test_ask_unknown_document() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(dir.path());
        let response = app
            .oneshot(json_request(
                "/api/qa/ask",
                json!({"document_id": 42, "question": "anything"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Document not found"
        );
    }

    #[tokio::test]
    async fn test_upload_extracts_text_and_answers() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(dir.path());
        let pdf = single_page_pdf(&["Jane Doe", "jane.doe@example.com"]);

        let response = app
            .clone()
            .oneshot(multipart_request("file", "cv.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "filename": "cv.pdf"})
        );

        let stored = stored_pdfs(dir.path());
        assert_eq!(stored.len(), 1);
        let name = stored[0].file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_cv.pdf"), "stored as {name}");
        assert!(content_path(&stored[0]).is_file());

        let response = app
            .oneshot(json_request(
                "/api/qa/1",
                json!({"question": "What is my email address?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["answer"],
            "The email address is: jane.doe@example.com"
        );
    }

    #[tokio::test]
    async fn test_failed_insert_removes_upload_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app_with_store(dir.path(), Arc::new(UnavailableStore));
        let pdf = single_page_pdf(&["Jane Doe"]);

        let response = app
            .oneshot(multipart_request("file", "cv.pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_text_is_processing_error() {
        let dir = tempfile::tempdir().unwrap();
        let (app, store) = test_app(dir.path());
        let id = seed_document(&store, dir.path(), None).await;
        let text_path = content_path(&dir.path().join("seed_resume.pdf"));
        std::fs::create_dir_all(text_path.parent().unwrap()).unwrap();
        std::fs::write(&text_path, [0xff, 0xfe, 0xfd]).unwrap();

        let response = app
            .oneshot(json_request(
                &format!("/api/qa/{id}"),
                json!({"question": "Who am I?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(
            message.starts_with("Error processing question"),
            "message was {message}"
        );
    }
}
