use crate::render;
use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

/// Unknown paths get a 404 that still sends the browser back to the index.
pub async fn not_found(uri: Uri) -> Response {
    warn!("No route for {}, redirecting to /", uri);

    (
        StatusCode::NOT_FOUND,
        [(header::LOCATION, "/")],
        Html(render::redirect_page("/").into_string()),
    )
        .into_response()
}
