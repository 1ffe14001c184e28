//! On-demand spreadsheet download

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::error::Result;
use crate::jobs::export;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/export
///
/// Writes the on-demand export file and returns it as an attachment.
pub async fn export_reviews(State(state): State<AppState>) -> Result<Response> {
    let path = state.paths.on_demand_export_path();

    // Held until the file has been read back
    let _guard = state.export_lock.lock().await;

    let count = export::export_reviews(&state.db, &path).await?;
    let bytes = tokio::fs::read(&path).await?;
    info!("Serving export download ({} reviews, {} bytes)", count, bytes.len());

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "reviews_export.xlsx".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
