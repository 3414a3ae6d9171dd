use serde::Serialize;

use crate::models::catalog::BookSummary;

pub const PAGE_SIZE: u32 = 10;

/// One page of a title-prefix search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub offset: u32,
    pub total: u64,
    pub books: Vec<BookSummary>,
    pub has_next: bool,
    pub has_prev: bool,
    pub prev_offset: u32,
    pub next_offset: u32,
}

impl SearchResult {
    pub fn new(query: String, offset: u32, total: u64, books: Vec<BookSummary>) -> Self {
        Self {
            query,
            offset,
            total,
            books,
            has_next: u64::from(offset) + u64::from(PAGE_SIZE) < total,
            has_prev: offset > 0,
            prev_offset: offset.saturating_sub(PAGE_SIZE),
            next_offset: offset.saturating_add(PAGE_SIZE),
        }
    }
}

/// Reads a client supplied offset; anything that is not a non-negative integer is 0.
pub fn parse_offset(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}
