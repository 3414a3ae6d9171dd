use maud::{html, Markup};

use super::layout;
use crate::models::search::SearchResult;
use crate::utils::text::percent_encode;

fn page_href(query: &str, offset: u32) -> String {
    format!("/search?q={}&offset={}", percent_encode(query), offset)
}

pub fn search_page(result: &SearchResult) -> Markup {
    layout(
        &format!("Titles starting with {}", result.query),
        html! {
            h1 { "Titles starting with \"" (result.query) "\"" }
            @if result.books.is_empty() {
                p class="empty" { "No books found." }
            } @else {
                p { "Showing " (u64::from(result.offset) + 1) " to " (u64::from(result.offset) + result.books.len() as u64) " of " (result.total) }
                ol start=(u64::from(result.offset) + 1) {
                    @for book in &result.books {
                        li { a href={ "/book/" (book.book_id) } { (book.title) } }
                    }
                }
            }
            nav class="pagination" {
                @if result.has_prev {
                    a rel="prev" href=(page_href(&result.query, result.prev_offset)) { "Previous" }
                }
                " "
                @if result.has_next {
                    a rel="next" href=(page_href(&result.query, result.next_offset)) { "Next" }
                }
            }
        },
    )
}
