use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use crate::utils::accept::{negotiate, Representation};
use crate::utils::text::parse_book_id;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Json, Response},
};
use tracing::info;

pub async fn get_book(
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let accept = headers
        .get(header::ACCEPT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    // Decided before the lookup so an unusable Accept never costs a query.
    let representation = negotiate(accept.as_deref())
        .ok_or_else(|| AppError::NotAcceptable(accept.clone().unwrap_or_default()))?;

    let book_id = parse_book_id(&raw_id)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid book id: {}", raw_id)))?;

    info!("Looking up book {} as {:?}", book_id, representation);

    let book = state
        .catalog
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Book {} not found", book_id),
            representation,
        })?;

    Ok(match representation {
        Representation::Html => Html(render::book_page(&book).into_string()).into_response(),
        Representation::Json => Json(book).into_response(),
    })
}
