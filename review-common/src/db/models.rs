//! Database models

use chrono::{DateTime, Utc};

/// A broadcast column as stored in the column directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: i64,
    pub name: String,
    pub program_name: Option<String>,
    pub editor: Option<String>,
    pub responsible_editor: Option<String>,
    /// Ordered, stored in `column_broadcasters`
    pub broadcasters: Vec<String>,
    pub director: Option<String>,
}

/// One row of the `reviews` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub column_id: i64,
    pub name: String,
    pub script: String,
    pub broadcast: String,
    pub padding: String,
    pub submit_time: DateTime<Utc>,
}

/// A validated review waiting to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub column_id: i64,
    pub name: String,
    pub script: String,
    pub broadcast: String,
    pub padding: String,
}
