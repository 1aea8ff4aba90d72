//! Listing repository implementations for different backends

#[cfg(feature = "remote")]
pub mod http;
pub mod in_memory;
pub mod json_file;

#[cfg(feature = "remote")]
pub use http::HttpListingRepository;
pub use in_memory::InMemoryListingRepository;
pub use json_file::JsonFileListingRepository;
