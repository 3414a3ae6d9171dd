use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use crate::config::ReviewConfig;
use crate::models::responses::{ReviewSet, UpstreamReviews};

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Review API responded with status {0}")]
    Upstream(StatusCode),
    #[error("Malformed review payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ReviewSource {
    async fn fetch_reviews(&self, title: &str, api_key: &str) -> Result<ReviewSet, ReviewError>;
}

pub struct NytReviewClient {
    client: Client,
    base_url: String,
}

impl NytReviewClient {
    pub fn new(config: &ReviewConfig) -> Result<Self, ReviewError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ReviewSource for NytReviewClient {
    async fn fetch_reviews(&self, title: &str, api_key: &str) -> Result<ReviewSet, ReviewError> {
        info!("Fetching reviews for {:?}", title);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("api-key", api_key), ("title", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReviewError::Upstream(response.status()));
        }

        let body = response.bytes().await?;
        let payload: UpstreamReviews = serde_json::from_slice(&body)?;

        // A zero count wins over a stray result list; a missing count defers to the list.
        let reviews = match payload.num_results {
            Some(0) => Vec::new(),
            _ => payload.results,
        };

        Ok(ReviewSet {
            title: title.to_string(),
            copyright: payload.copyright,
            reviews,
        })
    }
}
