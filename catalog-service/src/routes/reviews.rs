use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::error;

pub async fn get_reviews(
    Path(book_title): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let title = book_title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("A book title is required".to_string()));
    }

    if state.api_key.is_empty() {
        error!("NYT_API_KEY is not set; the review request will likely be rejected");
    }

    let set = state.reviews.fetch_reviews(title, &state.api_key).await?;
    Ok(Html(render::reviews_page(&set).into_string()))
}
