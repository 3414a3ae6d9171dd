pub mod accept;
pub mod text;
