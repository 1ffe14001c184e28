//! Review export: dump the whole review store to a spreadsheet

use crate::error::{Error, Result};
use crate::spreadsheet;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write every review to `path`; returns the number of rows written
///
/// Shared by the weekly job and the download endpoint; they pass different
/// paths so the two never write the same file.
pub async fn export_reviews(pool: &SqlitePool, path: &Path) -> Result<usize> {
    let reviews = crate::db::all_reviews(pool).await?;
    let count = reviews.len();
    let target: PathBuf = path.to_path_buf();

    tokio::task::spawn_blocking(move || spreadsheet::write_reviews(&reviews, &target))
        .await
        .map_err(|e| Error::Export(format!("export task failed: {}", e)))??;

    info!("Exported {} reviews to {}", count, path.display());
    Ok(count)
}
