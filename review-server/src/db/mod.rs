//! Query layer over the column directory and review store
//!
//! Write paths take a `Transaction` so callers decide the commit boundary.

pub mod columns;
pub mod reviews;

pub use columns::{get_column, list_columns, replace_columns, ColumnSummary};
pub use reviews::{all_reviews, count_reviews, insert_review, list_reviews_with_column, ReviewListing};
