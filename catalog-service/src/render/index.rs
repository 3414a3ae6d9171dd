use maud::{html, Markup};

use super::layout;

pub fn index_page() -> Markup {
    let letters = ('A'..='Z').map(String::from);
    let numbers = ('0'..='9').map(String::from);

    layout(
        "Browse",
        html! {
            h1 { "Browse books by title" }
            nav class="letters" {
                @for letter in letters {
                    a href={ "/search?q=" (letter) } { (letter) } " "
                }
            }
            nav class="numbers" {
                @for number in numbers {
                    a href={ "/search?q=" (number) } { (number) } " "
                }
            }
        },
    )
}
