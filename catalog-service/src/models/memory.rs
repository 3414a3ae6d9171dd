use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::models::catalog::{Book, BookId, BookSummary, CatalogBackend, CatalogError};

/// In-process catalog used by `BACKEND_TYPE=memory` and by the router tests.
///
/// Matching follows MySQL's default case-insensitive collation. Every operation
/// takes a lease, standing in for a pooled connection, and returns it on drop.
pub struct MemoryCatalog {
    books: Vec<Book>,
    leases: Arc<LeaseStats>,
    failing: AtomicBool,
}

#[derive(Debug, Default)]
pub struct LeaseStats {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl LeaseStats {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct Lease<'a>(&'a LeaseStats);

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl MemoryCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            leases: Arc::new(LeaseStats::default()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn with_sample_books() -> Self {
        Self::new(sample_books())
    }

    pub fn leases(&self) -> Arc<LeaseStats> {
        Arc::clone(&self.leases)
    }

    /// Makes every query fail after its lease is taken.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn acquire(&self) -> Lease<'_> {
        self.leases.acquired.fetch_add(1, Ordering::SeqCst);
        Lease(&self.leases)
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable(
                "memory catalog is in failing mode".to_string(),
            ));
        }
        Ok(())
    }

    fn matching(&self, pattern: &str) -> Vec<&Book> {
        let mut matches: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| like_matches(pattern, &book.title))
            .collect();
        matches.sort_by_key(|book| book.title.to_lowercase());
        matches
    }
}

/// Case-insensitive LIKE with `%`, `_` and backslash escapes.
fn like_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();
    like_from(&pattern, &text)
}

fn like_from(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_from(rest, &text[skip..])),
        Some(('_', rest)) => !text.is_empty() && like_from(rest, &text[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == Some(&rest[0]) && like_from(&rest[1..], &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && like_from(rest, &text[1..]),
    }
}

#[async_trait]
impl CatalogBackend for MemoryCatalog {
    async fn find_by_prefix(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BookSummary>, CatalogError> {
        let _lease = self.acquire();
        self.check()?;

        Ok(self
            .matching(pattern)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|book| BookSummary {
                book_id: book.book_id,
                title: book.title.clone(),
            })
            .collect())
    }

    async fn count_by_prefix(&self, pattern: &str) -> Result<u64, CatalogError> {
        let _lease = self.acquire();
        self.check()?;
        Ok(self.matching(pattern).len() as u64)
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, CatalogError> {
        let _lease = self.acquire();
        self.check()?;
        Ok(self.books.iter().find(|book| book.book_id == book_id).cloned())
    }

    async fn search_page(
        &self,
        pattern: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<BookSummary>, u64), CatalogError> {
        let _lease = self.acquire();
        self.check()?;

        let matches = self.matching(pattern);
        let total = matches.len() as u64;
        let books = matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|book| BookSummary {
                book_id: book.book_id,
                title: book.title.clone(),
            })
            .collect();

        Ok((books, total))
    }

    async fn test_connection(&self) -> Result<(), CatalogError> {
        let _lease = self.acquire();
        self.check()
    }
}

fn sample_book(book_id: BookId, title: &str, authors: &str, genres: &str) -> Book {
    Book {
        book_id,
        title: title.to_string(),
        authors: Some(authors.to_string()),
        description: None,
        edition: None,
        format: Some("Paperback".to_string()),
        pages: None,
        rating: None,
        rating_count: None,
        review_count: None,
        genres: Some(genres.to_string()),
        image_url: None,
    }
}

pub fn sample_books() -> Vec<Book> {
    vec![
        sample_book(1342, "Pride and Prejudice", "Jane Austen", "Classics|Romance"),
        sample_book(84, "Frankenstein", "Mary Wollstonecraft Shelley", "Classics|Horror"),
        sample_book(2701, "Moby Dick", "Herman Melville", "Classics|Adventure"),
        sample_book(11, "Alice's Adventures in Wonderland", "Lewis Carroll", "Classics|Fantasy"),
        sample_book(1661, "The Adventures of Sherlock Holmes", "Arthur Conan Doyle", "Mystery|Classics"),
        sample_book(98, "A Tale of Two Cities", "Charles Dickens", "Classics|Historical Fiction"),
        sample_book(1984, "1984", "George Orwell", "Dystopia|Science Fiction"),
        sample_book(4300, "Ulysses", "James Joyce", "Classics|Modernism"),
        sample_book(5200, "Good Omens", "Terry Pratchett|Neil Gaiman", "Fantasy|Humor"),
    ]
}
