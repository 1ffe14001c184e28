//! review-server library - listening review collection service
//!
//! HTTP routes over the column directory and review store, plus the
//! scheduled column sync and review export jobs.

use axum::Router;
use review_common::config::DataPaths;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod jobs;
pub mod spreadsheet;

pub use error::{Error, Result};
use jobs::JobHistory;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Fixed file locations under the data folder
    pub paths: DataPaths,
    /// Outcomes of scheduled and startup job runs
    pub job_history: JobHistory,
    /// Serializes on-demand exports, which share one output file
    pub export_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, paths: DataPaths, job_history: JobHistory) -> Self {
        Self {
            db,
            paths,
            job_history,
            export_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/columns", get(api::list_columns))
        .route("/api/column/:id", get(api::get_column_detail))
        .route("/api/submit", post(api::submit_review))
        .route("/api/reviews", get(api::list_reviews))
        .route("/api/export", get(api::export_reviews))
        .route("/api/jobs", get(api::list_job_runs));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
