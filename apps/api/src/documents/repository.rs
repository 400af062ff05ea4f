//! Document metadata persistence, pluggable behind `DocumentStore`.
//!
//! `AppState` carries an `Arc<dyn DocumentStore>`; production uses
//! `PgDocumentStore`, tests use the in-memory store below.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::document::{DocumentRow, NewDocument};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, document: NewDocument) -> Result<DocumentRow, AppError>;

    async fn list(&self) -> Result<Vec<DocumentRow>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<DocumentRow>, AppError>;
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, document: NewDocument) -> Result<DocumentRow, AppError> {
        Ok(sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (filename, file_path)
            VALUES ($1, $2)
            RETURNING id, filename, file_path, upload_date, title
            "#,
        )
        .bind(&document.filename)
        .bind(&document.file_path)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list(&self) -> Result<Vec<DocumentRow>, AppError> {
        Ok(sqlx::query_as::<_, DocumentRow>(
            "SELECT id, filename, file_path, upload_date, title FROM documents ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: i64) -> Result<Option<DocumentRow>, AppError> {
        Ok(sqlx::query_as::<_, DocumentRow>(
            "SELECT id, filename, file_path, upload_date, title FROM documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
