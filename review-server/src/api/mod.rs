//! HTTP API handlers for review-server

pub mod columns;
pub mod export;
pub mod health;
pub mod jobs;
pub mod reviews;
pub mod submit;
pub mod ui;

pub use columns::{get_column_detail, list_columns};
pub use export::export_reviews;
pub use health::health_routes;
pub use jobs::list_job_runs;
pub use reviews::list_reviews;
pub use submit::submit_review;
pub use ui::serve_index;
