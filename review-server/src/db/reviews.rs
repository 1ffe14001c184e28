//! Review store queries

use chrono::{DateTime, Utc};
use review_common::db::{NewReview, Review};
use review_common::time::format_display;
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// One review joined with its column name, keyed by display labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewListing {
    #[serde(rename = "栏目名称")]
    pub column_name: String,
    #[serde(rename = "姓名")]
    pub name: String,
    #[serde(rename = "稿件")]
    pub script: String,
    #[serde(rename = "播音")]
    pub broadcast: String,
    #[serde(rename = "垫乐")]
    pub padding: String,
    #[serde(rename = "提交时间")]
    pub submit_time: String,
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    column_name: String,
    name: String,
    script: String,
    broadcast: String,
    padding: String,
    submit_time: DateTime<Utc>,
}

/// Insert one review stamped with `submit_time` if its column exists
///
/// The existence check and the insert are one statement, so the write lock
/// is taken up front and a sync committing mid-request cannot invalidate a
/// read snapshot. Returns the new row id, or `None` for an unknown column.
pub async fn insert_review(
    tx: &mut Transaction<'_, Sqlite>,
    review: &NewReview,
    submit_time: DateTime<Utc>,
) -> Result<Option<i64>, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO reviews (column_id, name, script, broadcast, padding, submit_time)
         SELECT ?, ?, ?, ?, ?, ?
         WHERE EXISTS (SELECT 1 FROM columns WHERE id = ?)",
    )
    .bind(review.column_id)
    .bind(&review.name)
    .bind(&review.script)
    .bind(&review.broadcast)
    .bind(&review.padding)
    .bind(submit_time)
    .bind(review.column_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(result.last_insert_rowid()))
}

/// Reviews whose column still exists, with that column's current name
///
/// Inner join: a review pointing at a column id no longer in the directory
/// is left out.
pub async fn list_reviews_with_column(
    pool: &SqlitePool,
) -> Result<Vec<ReviewListing>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ListingRow>(
        "SELECT c.name AS column_name, r.name, r.script, r.broadcast, r.padding, r.submit_time
         FROM reviews r
         INNER JOIN columns c ON r.column_id = c.id
         ORDER BY r.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ReviewListing {
            column_name: row.column_name,
            name: row.name,
            script: row.script,
            broadcast: row.broadcast,
            padding: row.padding,
            submit_time: format_display(&row.submit_time),
        })
        .collect())
}

/// Every stored review, orphaned or not, in insertion order
pub async fn all_reviews(pool: &SqlitePool) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT id, column_id, name, script, broadcast, padding, submit_time
         FROM reviews ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_reviews(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await
}
