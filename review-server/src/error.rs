//! Error types for review-server
//!
//! Handlers and jobs return these; the HTTP layer turns every variant into
//! the `{status: "error", message}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the column snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot file does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("cannot read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot is missing the 'columns' key")]
    MissingKey,
}

/// Main error type for review-server
#[derive(Error, Debug)]
pub enum Error {
    /// A required submission field is absent or empty
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// Submission references a column that does not exist
    #[error("invalid column id: {0}")]
    InvalidReference(String),

    /// Lookup by id found nothing
    #[error("not found: {0}")]
    NotFound(String),

    #[error("column sync failed: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Spreadsheet serialization or write failure
    #[error("export failed: {0}")]
    Export(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Request body could not be decoded
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(e.to_string())
    }
}

impl From<tokio_cron_scheduler::JobSchedulerError> for Error {
    fn from(e: tokio_cron_scheduler::JobSchedulerError) -> Self {
        Error::Scheduler(e.to_string())
    }
}

/// Convenience Result type using review-server Error
pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Only unknown detail ids get a distinct status code
        let status = match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        };

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
