//! Book catalog web service.
//!
//! Browse titles by first letter, search by title prefix with pagination,
//! show a book's details as HTML or JSON, and pull third-party reviews for a
//! title. Catalog data lives in MySQL and is only ever read.

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use routes::{
    book::get_book, fallback::not_found, health::health_check, index::index, reviews::get_reviews,
    search::search_books,
};
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/search", get(search_books))
        .route("/book/:book_id", get(get_book))
        .route("/reviews/:book_title", get(get_reviews))
        .route("/status", get(health_check))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
