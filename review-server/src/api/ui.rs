//! UI serving routes
//!
//! Serves the embedded review form page

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/review_form.html");

/// GET /
///
/// Serves the review submission form
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
