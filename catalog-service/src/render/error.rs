use maud::{html, Markup};

use super::layout;

pub fn error_page(status: u16, message: &str) -> Markup {
    layout(
        &format!("Error {}", status),
        html! {
            h1 { "Error " (status) }
            p class="error" { (message) }
            a href="/" { "Back to the catalog" }
        },
    )
}

pub fn redirect_page(target: &str) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                title { "Not Found" }
            }
            body {
                p { "Page not found. Redirecting to " a href=(target) { (target) } "." }
            }
        }
    }
}
