pub mod comic;
pub mod error;
