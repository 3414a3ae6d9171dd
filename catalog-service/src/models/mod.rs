pub mod catalog;
pub mod memory;
pub mod responses;
pub mod search;
