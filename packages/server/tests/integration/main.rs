mod common;
mod content;
mod marketing;
mod seed;
mod upload;
