//! Column sync: replace the column directory from the JSON snapshot
//!
//! Snapshot shape:
//!
//! ```json
//! {"columns": [{"id": 1, "name": "...", "programName": "...", "editor": "...",
//!               "responsibleEditor": "...", "broadcasters": ["..."], "director": "..."}]}
//! ```

use crate::error::{Result, SnapshotError};
use review_common::db::Column;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

/// One entry of the snapshot's `columns` array; every key is required
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotColumn {
    pub id: i64,
    pub name: String,
    pub program_name: String,
    pub editor: String,
    pub responsible_editor: String,
    pub broadcasters: Vec<String>,
    pub director: String,
}

impl From<SnapshotColumn> for Column {
    fn from(c: SnapshotColumn) -> Self {
        Column {
            id: c.id,
            name: c.name,
            program_name: Some(c.program_name),
            editor: Some(c.editor),
            responsible_editor: Some(c.responsible_editor),
            broadcasters: c.broadcasters,
            director: Some(c.director),
        }
    }
}

/// Parse snapshot text into column records
pub fn parse_snapshot(text: &str) -> std::result::Result<Vec<Column>, SnapshotError> {
    let mut document: serde_json::Value = serde_json::from_str(text)?;

    let columns = document
        .as_object_mut()
        .and_then(|obj| obj.remove("columns"))
        .ok_or(SnapshotError::MissingKey)?;

    let entries: Vec<SnapshotColumn> = serde_json::from_value(columns)?;
    Ok(entries.into_iter().map(Column::from).collect())
}

/// Read the snapshot file at `path`
pub async fn load_snapshot(path: &Path) -> std::result::Result<Vec<Column>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::Missing(path.to_path_buf()));
    }

    let text = tokio::fs::read_to_string(path).await?;
    parse_snapshot(&text)
}

/// Run one sync: load the snapshot and swap the column directory atomically
///
/// The snapshot is fully parsed before the transaction opens, so any
/// snapshot failure leaves the directory untouched. Returns the number of
/// columns now in the directory.
pub async fn run_sync(pool: &SqlitePool, snapshot_path: &Path) -> Result<usize> {
    let columns = load_snapshot(snapshot_path).await?;
    debug!("Snapshot parsed: {} columns", columns.len());

    let mut tx = pool.begin().await?;
    crate::db::replace_columns(&mut tx, &columns).await?;
    tx.commit().await?;

    info!(
        "Column directory replaced from {} ({} columns)",
        snapshot_path.display(),
        columns.len()
    );
    Ok(columns.len())
}
