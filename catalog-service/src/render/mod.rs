//! Server-side HTML views, written as maud templates.
//!
//! Every page goes through [`layout`]. Views only project data that the route
//! handlers already computed. All interpolated values are escaped by maud.

mod book;
mod error;
mod index;
mod reviews;
mod search;

pub use book::book_page;
pub use error::{error_page, redirect_page};
pub use index::index_page;
pub use reviews::reviews_page;
pub use search::search_page;

use maud::{html, Markup, DOCTYPE};

pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Book Catalog" }
            }
            body {
                header {
                    a href="/" { "Book Catalog" }
                }
                main { (body) }
            }
        }
    }
}
