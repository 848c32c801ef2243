pub mod media;
pub mod permission;
