pub mod content;
pub mod marketing;
pub mod upload;
