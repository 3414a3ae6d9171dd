use maud::{html, Markup};

use super::layout;
use crate::models::responses::ReviewSet;

pub fn reviews_page(set: &ReviewSet) -> Markup {
    layout(
        &format!("Reviews of {}", set.title),
        html! {
            h1 { "Reviews of " (set.title) }
            @if set.no_results() {
                p class="no-results" { "No reviews found." }
            } @else {
                @for review in &set.reviews {
                    section class="review" {
                        @if let Some(book_title) = &review.book_title {
                            h2 { (book_title) }
                        }
                        @if let Some(author) = &review.book_author {
                            p class="author" { (author) }
                        }
                        @if let Some(byline) = &review.byline {
                            p class="byline" { "Reviewed by " (byline) }
                        }
                        @if let Some(date) = &review.publication_dt {
                            p class="date" { (date) }
                        }
                        @if let Some(summary) = &review.summary {
                            p class="summary" { (summary) }
                        }
                        @if let Some(url) = &review.url {
                            a href=(url) { "Read review" }
                        }
                    }
                }
            }
            footer class="copyright" { (set.copyright) }
        },
    )
}
