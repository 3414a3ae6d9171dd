use crate::render;
use axum::response::Html;

pub async fn index() -> Html<String> {
    Html(render::index_page().into_string())
}
