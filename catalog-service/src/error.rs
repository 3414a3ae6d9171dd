use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::catalog::CatalogError;
use crate::models::responses::ErrorResponse;
use crate::render;
use crate::services::reviews::ReviewError;
use crate::utils::accept::Representation;

/// Errors a route handler can end in. Internal details are logged here and
/// never sent to the client.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] CatalogError),
    #[error("Review service error: {0}")]
    RemoteService(#[from] ReviewError),
    #[error("{message}")]
    NotFound {
        message: String,
        representation: Representation,
    },
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RemoteService(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "The catalog is unavailable right now. Please try again later.".to_string()
            }
            AppError::RemoteService(_) => {
                "Reviews could not be retrieved right now. Please try again later.".to_string()
            }
            AppError::NotFound { message, .. } => message.clone(),
            AppError::NotAcceptable(accept) => {
                format!("Cannot produce a representation for Accept: {}", accept)
            }
            AppError::BadRequest(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{} ({})", self, status);
        } else {
            warn!("{} ({})", self, status);
        }

        let message = self.public_message();
        match self {
            AppError::NotAcceptable(_) => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response(),
            AppError::NotFound {
                representation: Representation::Json,
                ..
            } => (status, Json(ErrorResponse { error: message })).into_response(),
            _ => (
                status,
                Html(render::error_page(status.as_u16(), &message).into_string()),
            )
                .into_response(),
        }
    }
}
