use maud::{html, Markup};

use super::layout;
use crate::models::catalog::Book;
use crate::utils::text::{display_list, percent_encode};

pub fn book_page(book: &Book) -> Markup {
    let authors = display_list(book.authors.as_deref());
    let genres = display_list(book.genres.as_deref());

    layout(
        &book.title,
        html! {
            article class="book" {
                h1 { (book.title) }
                @if let Some(image_url) = &book.image_url {
                    img src=(image_url) alt=(book.title);
                }
                dl {
                    dt { "Authors" } dd class="authors" { (authors) }
                    dt { "Genres" } dd class="genres" { (genres) }
                    @if let Some(pages) = book.pages {
                        dt { "Pages" } dd class="pages" { (pages) }
                    }
                    @if let Some(rating) = book.rating {
                        dt { "Rating" } dd class="rating" { (format!("{:.2}", rating)) }
                    }
                    @if let Some(edition) = &book.edition {
                        dt { "Edition" } dd class="edition" { (edition) }
                    }
                    @if let Some(format) = &book.format {
                        dt { "Format" } dd class="format" { (format) }
                    }
                }
                @if let Some(description) = &book.description {
                    p class="description" { (description) }
                }
                a href={ "/reviews/" (percent_encode(&book.title)) } { "Reviews" }
            }
        },
    )
}
