//! Column directory endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::db::{self, ColumnSummary};
use crate::error::{Error, Result};
use crate::AppState;

/// Column detail as shown next to the form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDetailResponse {
    pub program_name: Option<String>,
    pub editor: Option<String>,
    pub responsible_editor: Option<String>,
    pub broadcasters: Vec<String>,
    pub director: Option<String>,
}

/// GET /api/columns
///
/// Every column as `{id, name}`; order is whatever the store returns.
pub async fn list_columns(State(state): State<AppState>) -> Result<Json<Vec<ColumnSummary>>> {
    Ok(Json(db::list_columns(&state.db).await?))
}

/// GET /api/column/:id
pub async fn get_column_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ColumnDetailResponse>> {
    let column = db::get_column(&state.db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("column {}", id)))?;

    Ok(Json(ColumnDetailResponse {
        program_name: column.program_name,
        editor: column.editor,
        responsible_editor: column.responsible_editor,
        broadcasters: column.broadcasters,
        director: column.director,
    }))
}
