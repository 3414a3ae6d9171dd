use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A single review as returned by the upstream API. Only the fields the
/// reviews page shows are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub book_title: Option<String>,
    pub book_author: Option<String>,
    pub byline: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub publication_dt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamReviews {
    #[serde(default)]
    pub copyright: String,
    pub num_results: Option<u64>,
    #[serde(default)]
    pub results: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSet {
    pub title: String,
    pub copyright: String,
    pub reviews: Vec<Review>,
}

impl ReviewSet {
    pub fn no_results(&self) -> bool {
        self.reviews.is_empty()
    }
}
