use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use catalog_service::models::catalog::{Book, BookSummary};
use catalog_service::models::memory::MemoryCatalog;
use catalog_service::models::responses::{Review, ReviewSet};
use catalog_service::services::reviews::{ReviewError, ReviewSource};
use catalog_service::{router, AppState};

#[derive(Default)]
struct StubReviews {
    reviews: Vec<Review>,
    calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ReviewSource for StubReviews {
    async fn fetch_reviews(&self, title: &str, api_key: &str) -> Result<ReviewSet, ReviewError> {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), api_key.to_string()));
        Ok(ReviewSet {
            title: title.to_string(),
            copyright: "Copyright (c) Example Reviews".to_string(),
            reviews: self.reviews.clone(),
        })
    }
}

struct RejectingReviews;

#[async_trait]
impl ReviewSource for RejectingReviews {
    async fn fetch_reviews(&self, _title: &str, _api_key: &str) -> Result<ReviewSet, ReviewError> {
        Err(ReviewError::Upstream(reqwest::StatusCode::UNAUTHORIZED))
    }
}

fn book(book_id: u32, title: &str) -> Book {
    Book {
        book_id,
        title: title.to_string(),
        authors: Some("A|B".to_string()),
        description: Some("About the book".to_string()),
        edition: None,
        format: Some("Hardcover".to_string()),
        pages: Some(321),
        rating: Some(4.25),
        rating_count: Some(10),
        review_count: Some(2),
        genres: Some("X|Y".to_string()),
        image_url: None,
    }
}

fn catalog_with_many_h_titles() -> MemoryCatalog {
    let mut books: Vec<Book> = (0..23)
        .map(|i| book(100 + i, &format!("Harbor {:02}", i)))
        .collect();
    books.push(book(1, "Zebra Tales"));
    books.push(book(2, "100% Juice"));
    books.push(book(3, "1000 Days"));
    MemoryCatalog::new(books)
}

fn app_with(catalog: Arc<MemoryCatalog>, reviews: Arc<StubReviews>, api_key: &str) -> Router {
    router(AppState::new(catalog, reviews, api_key))
}

fn app(catalog: Arc<MemoryCatalog>) -> Router {
    app_with(catalog, Arc::new(StubReviews::default()), "test-key")
}

async fn get(app: Router, uri: &str, accept: Option<&str>) -> (StatusCode, axum::http::HeaderMap, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(accept) = accept {
        request = request.header(header::ACCEPT, accept);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn index_lists_letters_and_numbers() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    for uri in ["/", "/index.html"] {
        let (status, _, body) = get(app(catalog.clone()), uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/search?q=A""#));
        assert!(body.contains(r#"href="/search?q=Z""#));
        assert!(body.contains(r#"href="/search?q=0""#));
        assert!(body.contains(r#"href="/search?q=9""#));
    }
}

#[tokio::test]
async fn search_paginates_by_ten() {
    let catalog = Arc::new(catalog_with_many_h_titles());

    let (status, _, body) = get(app(catalog.clone()), "/search?q=h", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Harbor 00"));
    assert!(body.contains("Harbor 09"));
    assert!(!body.contains("Harbor 10"));
    assert!(!body.contains("Zebra"));
    assert!(body.contains(r#"href="/search?q=h&amp;offset=10""#));
    assert!(!body.contains(r#"rel="prev""#));

    let (_, _, body) = get(app(catalog.clone()), "/search?q=h&offset=20", None).await;
    assert!(body.contains("Harbor 20"));
    assert!(body.contains("Harbor 22"));
    assert!(!body.contains("Harbor 19"));
    assert!(!body.contains(r#"rel="next""#));
    assert!(body.contains(r#"href="/search?q=h&amp;offset=10""#));
}

#[tokio::test]
async fn search_treats_bad_offset_as_zero() {
    let catalog = Arc::new(catalog_with_many_h_titles());
    let (status, _, body) = get(app(catalog), "/search?q=H&offset=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Harbor 00"));
}

#[tokio::test]
async fn search_prefix_is_literal() {
    let catalog = Arc::new(catalog_with_many_h_titles());
    let (_, _, body) = get(app(catalog), "/search?q=100%25", None).await;
    assert!(body.contains("100% Juice"));
    assert!(!body.contains("1000 Days"));
}

#[tokio::test]
async fn search_failure_is_a_sanitized_500() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    catalog.set_failing(true);

    let (status, _, body) = get(app(catalog.clone()), "/search?q=A", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("The catalog is unavailable"));
    assert!(!body.contains("failing mode"));
}

#[tokio::test]
async fn every_request_releases_its_connection() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let leases = catalog.leases();

    get(app(catalog.clone()), "/search?q=A", None).await;
    get(app(catalog.clone()), "/book/84", None).await;
    get(app(catalog.clone()), "/book/999", None).await;
    catalog.set_failing(true);
    get(app(catalog.clone()), "/search?q=A", None).await;
    get(app(catalog.clone()), "/book/84", Some("application/json")).await;

    assert_eq!(leases.acquired(), 5);
    assert_eq!(leases.released(), 5);
}

#[tokio::test]
async fn book_detail_html_splits_lists() {
    let catalog = Arc::new(MemoryCatalog::new(vec![book(7, "Seven")]));
    let (status, headers, body) = get(app(catalog), "/book/7", Some("text/html")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert!(body.contains("A, B"));
    assert!(body.contains("X, Y"));
    assert!(body.contains("Seven"));
}

#[tokio::test]
async fn book_detail_json_is_the_raw_row() {
    let catalog = Arc::new(MemoryCatalog::new(vec![book(7, "Seven")]));
    let (status, headers, body) = get(app(catalog), "/book/7", Some("application/json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let json: Book = serde_json::from_str(&body).unwrap();
    assert_eq!(json, book(7, "Seven"));
}

#[tokio::test]
async fn book_detail_rejects_unsupported_accept() {
    let catalog = Arc::new(MemoryCatalog::new(vec![book(7, "Seven")]));
    let leases = catalog.leases();
    let (status, _, body) = get(app(catalog), "/book/7", Some("text/plain")).await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body.contains("text/plain"));
    assert_eq!(leases.acquired(), 0);
}

#[tokio::test]
async fn missing_book_is_404() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());

    let (status, _, body) = get(app(catalog.clone()), "/book/424242", Some("text/html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Book 424242 not found"));

    let (status, _, body) = get(app(catalog), "/book/424242", Some("application/json")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Book 424242 not found");
}

#[tokio::test]
async fn malformed_book_id_is_400() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let leases = catalog.leases();
    let (status, _, _) = get(app(catalog), "/book/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(leases.acquired(), 0);
}

#[tokio::test]
async fn reviews_render_results_and_copyright() {
    let reviews = Arc::new(StubReviews {
        reviews: vec![Review {
            book_title: Some("Moby Dick".to_string()),
            byline: Some("A. Critic".to_string()),
            summary: Some("Whale of a tale.".to_string()),
            ..Review::default()
        }],
        ..StubReviews::default()
    });
    let catalog = Arc::new(MemoryCatalog::with_sample_books());

    let (status, _, body) = get(
        app_with(catalog, reviews.clone(), "k3y"),
        "/reviews/Moby%20Dick",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Whale of a tale."));
    assert!(body.contains("Copyright (c) Example Reviews"));
    assert!(!body.contains("No reviews found."));
    assert_eq!(
        reviews.calls.lock().unwrap().as_slice(),
        &[("Moby Dick".to_string(), "k3y".to_string())]
    );
}

#[tokio::test]
async fn reviews_with_no_results() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let (status, _, body) = get(app(catalog), "/reviews/Unknown", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No reviews found."));
}

#[tokio::test]
async fn reviews_are_attempted_without_api_key() {
    let reviews = Arc::new(StubReviews::default());
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let (status, _, _) = get(app_with(catalog, reviews.clone(), ""), "/reviews/Ulysses", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn review_service_failure_is_a_sanitized_502() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let app = router(AppState::new(catalog, Arc::new(RejectingReviews), "k"));

    let (status, _, body) = get(app, "/reviews/Ulysses", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Reviews could not be retrieved"));
    assert!(!body.contains("401"));
    assert!(!body.contains("Unauthorized"));
    assert!(!body.contains("nytimes"));
}

#[tokio::test]
async fn blank_review_title_is_400() {
    let reviews = Arc::new(StubReviews::default());
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let (status, _, _) = get(app_with(catalog, reviews.clone(), "k"), "/reviews/%20%20", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reviews.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_path_redirects_home_with_404() {
    let catalog = Arc::new(MemoryCatalog::with_sample_books());
    let (status, headers, body) = get(app(catalog), "/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::LOCATION], "/");
    assert!(body.contains(r#"http-equiv="refresh""#));
}

#[test]
fn summaries_serialize_with_ids() {
    let summary = BookSummary {
        book_id: 5,
        title: "Five".to_string(),
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["book_id"], 5);
}
