//! Review listing endpoint

use axum::{extract::State, Json};

use crate::db::{self, ReviewListing};
use crate::error::Result;
use crate::AppState;

/// GET /api/reviews
///
/// One entry per review whose column still exists, with Chinese display keys.
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<ReviewListing>>> {
    Ok(Json(db::list_reviews_with_column(&state.db).await?))
}
