pub mod core_store;
pub mod entry;
pub mod file;
pub mod permission;
pub mod role;
