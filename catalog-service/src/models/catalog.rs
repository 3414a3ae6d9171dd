use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub type BookId = u32;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("MySQL error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Query exceeded deadline of {0:?}")]
    Timeout(Duration),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A full row of the `books` table.
///
/// `authors` and `genres` keep the pipe-delimited form they are stored in; the
/// detail view splits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub authors: Option<String>,
    pub description: Option<String>,
    pub edition: Option<String>,
    pub format: Option<String>,
    pub pages: Option<i32>,
    pub rating: Option<f64>,
    pub rating_count: Option<i32>,
    pub review_count: Option<i32>,
    pub genres: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub book_id: BookId,
    pub title: String,
}

#[async_trait]
pub trait CatalogBackend {
    /// Titles matching `pattern` (an already escaped LIKE pattern), ordered by title.
    async fn find_by_prefix(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BookSummary>, CatalogError>;
    async fn count_by_prefix(&self, pattern: &str) -> Result<u64, CatalogError>;
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, CatalogError>;
    /// One page of matches plus the total count, read over a single connection.
    async fn search_page(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<BookSummary>, u64), CatalogError>;
    async fn test_connection(&self) -> Result<(), CatalogError>;
    async fn close(&self) {}
}

const SELECT_BY_PREFIX: &str =
    "SELECT book_id, title FROM books WHERE title LIKE ? ORDER BY title ASC LIMIT ? OFFSET ?";
const COUNT_BY_PREFIX: &str = "SELECT COUNT(*) AS count FROM books WHERE title LIKE ?";
const SELECT_BY_ID: &str = r#"
    SELECT book_id, title, authors, description, edition, format, pages,
           rating, rating_count, review_count, genres, image_url
    FROM books WHERE book_id = ?
"#;

pub struct MySqlCatalog {
    pool: MySqlPool,
    deadline: Duration,
}

impl MySqlCatalog {
    /// Builds the pool without opening a connection; `test_connection` is the
    /// first point that talks to the server.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .timezone(Some(config.timezone.clone()));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.timeout)
            .connect_lazy_with(options);

        Self {
            pool,
            deadline: config.timeout,
        }
    }

    async fn within_deadline<T, F>(&self, fut: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        with_deadline(self.deadline, fut).await
    }
}

/// Runs a catalog operation, turning expiry of `deadline` into `CatalogError::Timeout`.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| CatalogError::Timeout(deadline))?
}

fn summary_from_row(row: &MySqlRow) -> Result<BookSummary, sqlx::Error> {
    Ok(BookSummary {
        book_id: row.try_get("book_id")?,
        title: row.try_get("title")?,
    })
}

fn book_from_row(row: &MySqlRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        book_id: row.try_get("book_id")?,
        title: row.try_get("title")?,
        authors: row.try_get("authors")?,
        description: row.try_get("description")?,
        edition: row.try_get("edition")?,
        format: row.try_get("format")?,
        pages: row.try_get("pages")?,
        rating: row.try_get("rating")?,
        rating_count: row.try_get("rating_count")?,
        review_count: row.try_get("review_count")?,
        genres: row.try_get("genres")?,
        image_url: row.try_get("image_url")?,
    })
}

async fn select_by_prefix(
    conn: &mut MySqlConnection,
    pattern: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<BookSummary>, CatalogError> {
    let rows = sqlx::query(SELECT_BY_PREFIX)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| summary_from_row(row).map_err(CatalogError::from))
        .collect()
}

async fn select_count(conn: &mut MySqlConnection, pattern: &str) -> Result<u64, CatalogError> {
    let row = sqlx::query(COUNT_BY_PREFIX)
        .bind(pattern)
        .fetch_one(&mut *conn)
        .await?;

    let count: i64 = row.try_get("count")?;
    Ok(count.max(0) as u64)
}

#[async_trait]
impl CatalogBackend for MySqlCatalog {
    async fn find_by_prefix(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BookSummary>, CatalogError> {
        self.within_deadline(async {
            let mut conn = self.pool.acquire().await?;
            select_by_prefix(&mut conn, pattern, limit, offset).await
        })
        .await
    }

    async fn count_by_prefix(&self, pattern: &str) -> Result<u64, CatalogError> {
        self.within_deadline(async {
            let mut conn = self.pool.acquire().await?;
            select_count(&mut conn, pattern).await
        })
        .await
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, CatalogError> {
        self.within_deadline(async {
            let row = sqlx::query(SELECT_BY_ID)
                .bind(book_id)
                .fetch_optional(&self.pool)
                .await?;

            match row {
                Some(row) => Ok::<_, CatalogError>(Some(book_from_row(&row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn search_page(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<BookSummary>, u64), CatalogError> {
        self.within_deadline(async {
            // Both statements share the connection; it goes back to the pool on drop.
            let mut conn = self.pool.acquire().await?;
            let books = select_by_prefix(&mut conn, pattern, limit, offset).await?;
            let total = select_count(&mut conn, pattern).await?;
            Ok::<_, CatalogError>((books, total))
        })
        .await
    }

    async fn test_connection(&self) -> Result<(), CatalogError> {
        self.within_deadline(async {
            sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
            Ok::<_, CatalogError>(())
        })
        .await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
