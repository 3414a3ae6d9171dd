use crate::error::AppError;
use crate::models::search::{parse_offset, SearchResult, PAGE_SIZE};
use crate::render;
use crate::state::AppState;
use crate::utils::text::prefix_pattern;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    // kept as text so that a malformed offset falls back to 0 instead of a 400
    pub offset: Option<String>,
}

pub async fn search_books(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    info!("Search query: {:?}", params);

    let offset = parse_offset(params.offset.as_deref());
    let pattern = prefix_pattern(&params.q);

    let (books, total) = state
        .catalog
        .search_page(&pattern, PAGE_SIZE, offset)
        .await?;

    let result = SearchResult::new(params.q, offset, total, books);
    Ok(Html(render::search_page(&result).into_string()))
}
