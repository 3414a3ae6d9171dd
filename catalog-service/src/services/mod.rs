pub mod reviews;
