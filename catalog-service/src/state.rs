use std::sync::Arc;

use crate::models::catalog::CatalogBackend;
use crate::services::reviews::ReviewSource;

pub type Backend = Arc<dyn CatalogBackend + Send + Sync>;
pub type Reviews = Arc<dyn ReviewSource + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Backend,
    pub reviews: Reviews,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(catalog: Backend, reviews: Reviews, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            catalog,
            reviews,
            api_key: api_key.into(),
        }
    }
}
