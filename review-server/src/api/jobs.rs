//! Job history endpoint

use axum::{extract::State, Json};

use crate::jobs::JobRecord;
use crate::AppState;

/// GET /api/jobs
///
/// Recent sync/export runs, most recent first.
pub async fn list_job_runs(State(state): State<AppState>) -> Json<Vec<JobRecord>> {
    Json(state.job_history.entries().await)
}
