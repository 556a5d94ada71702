//! Wardrobe persistence backends for Fitify.

pub mod in_memory;
pub mod json_file;
pub mod images;

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;
pub use images::FsImageStore;
