pub mod book;
pub mod fallback;
pub mod health;
pub mod index;
pub mod reviews;
pub mod search;
