use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRow {
    pub id: i64,
    pub filename: String,
    pub file_path: String,
    pub upload_date: DateTime<Utc>,
    pub title: Option<String>,
}

/// Fields supplied by the caller when recording an upload.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub file_path: String,
}

/// Public view of a document. The storage path stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: i64,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub title: Option<String>,
}

impl From<DocumentRow> for DocumentResponse {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename,
            upload_date: row.upload_date,
            title: row.title,
        }
    }
}
