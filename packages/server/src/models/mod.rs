pub mod content;
pub mod file;
pub mod marketing;
pub mod shared;
