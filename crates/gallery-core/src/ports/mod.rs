//! Port traits (interfaces) for dependency injection

pub mod blob;
pub mod storage;

pub use blob::BlobStore;
pub use storage::{MemoryStore, TextStore};
