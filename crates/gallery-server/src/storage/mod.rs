//! Storage layer
//!
//! PostgreSQL for memory and text rows, an S3 bucket for image bytes.

pub mod bucket;
pub mod db;
#[cfg(test)]
pub mod memory;

pub use bucket::S3BlobStore;
pub use db::Database;
#[cfg(test)]
pub use memory::{InMemoryBlobStore, InMemoryStore};
