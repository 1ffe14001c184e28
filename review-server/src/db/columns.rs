//! Column directory queries

use review_common::db::Column;
use serde::Serialize;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

/// Entry returned by the column picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ColumnSummary {
    pub id: i64,
    pub name: String,
}

/// All columns as id+name pairs, in storage order
pub async fn list_columns(pool: &SqlitePool) -> Result<Vec<ColumnSummary>, sqlx::Error> {
    sqlx::query_as::<_, ColumnSummary>("SELECT id, name FROM columns")
        .fetch_all(pool)
        .await
}

/// Full column record with its ordered broadcaster list
///
/// Both reads share one transaction so a sync committing in between cannot
/// pair one snapshot's attributes with another snapshot's broadcasters.
pub async fn get_column(pool: &SqlitePool, id: i64) -> Result<Option<Column>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "SELECT id, name, program_name, editor, responsible_editor, director
         FROM columns WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let broadcasters: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM column_broadcasters WHERE column_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(Column {
        id: row.get("id"),
        name: row.get("name"),
        program_name: row.get("program_name"),
        editor: row.get("editor"),
        responsible_editor: row.get("responsible_editor"),
        broadcasters,
        director: row.get("director"),
    }))
}

/// Delete every column and insert `columns` in their place
///
/// Runs inside the caller's transaction; nothing is visible to other
/// connections until the caller commits. A duplicate id aborts with a
/// primary-key error and the caller's rollback restores the old set.
pub async fn replace_columns(
    tx: &mut Transaction<'_, Sqlite>,
    columns: &[Column],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM column_broadcasters")
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM columns").execute(&mut **tx).await?;

    for column in columns {
        sqlx::query(
            "INSERT INTO columns (id, name, program_name, editor, responsible_editor, director)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(column.id)
        .bind(&column.name)
        .bind(&column.program_name)
        .bind(&column.editor)
        .bind(&column.responsible_editor)
        .bind(&column.director)
        .execute(&mut **tx)
        .await?;

        for (position, name) in column.broadcasters.iter().enumerate() {
            sqlx::query(
                "INSERT INTO column_broadcasters (column_id, position, name) VALUES (?, ?, ?)",
            )
            .bind(column.id)
            .bind(position as i64)
            .bind(name)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(())
}
