pub mod cdn;
pub mod storage;

pub use cdn::{CdnBase, UrlRewriter};
