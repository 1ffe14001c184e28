//! Database initialization
//!
//! The review store carries no migrations: every process start drops the
//! tables and creates them again, so all prior data is discarded.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Tables in drop order (children first)
const TABLES: [&str; 3] = ["reviews", "column_broadcasters", "columns"];

/// Open (creating if needed) the database and rebuild the schema
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    info!("Opened database: {}", db_path.display());

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL lets request readers proceed while a sync transaction is open
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    reset_schema(&pool).await?;

    Ok(pool)
}

/// Drop every table and create the schema from scratch
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }

    create_columns_table(pool).await?;
    create_column_broadcasters_table(pool).await?;
    create_reviews_table(pool).await?;

    info!("Schema recreated ({} tables)", TABLES.len());
    Ok(())
}

async fn create_columns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE columns (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            program_name TEXT,
            editor TEXT,
            responsible_editor TEXT,
            director TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Ordered broadcaster names, one row per name
async fn create_column_broadcasters_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE column_broadcasters (
            column_id INTEGER NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (column_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Reviews keep a plain column_id (no FK) so a sync can replace columns
/// without touching existing reviews.
async fn create_reviews_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            column_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            script TEXT NOT NULL,
            broadcast TEXT NOT NULL,
            padding TEXT NOT NULL,
            submit_time TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX idx_reviews_column_id ON reviews(column_id)")
        .execute(pool)
        .await?;

    Ok(())
}
