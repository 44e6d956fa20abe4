//! Snapshot persistence adapters for the [`StoreBackend`] port.
//!
//! [`JsonFileStore`] is the production backing; [`InMemoryStore`] is the
//! filesystem-free substitute used throughout the test suites.
//!
//! [`StoreBackend`]: crate::domain::StoreBackend

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
