//! Storage traits for persistence
//!
//! Every call is one unit of work: implementations acquire whatever
//! connection they need for the call and release it before returning,
//! on success and on error alike.

use crate::Result;
use async_trait::async_trait;
use gallery_types::{Memory, NewMemory, TextEntry};

/// Memory store
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// All memories, newest `created_at` first
    async fn list_memories(&self) -> Result<Vec<Memory>>;

    /// Insert and commit a row, returning its generated id
    async fn insert_memory(&self, memory: &NewMemory) -> Result<i64>;

    /// Delete the row matching `id`, returning the number of rows removed.
    /// `id` is passed through as received; the store decides how it matches.
    async fn delete_memory(&self, id: &str) -> Result<u64>;
}

/// Site text store
#[async_trait]
pub trait TextStore: Send + Sync {
    async fn list_texts(&self) -> Result<Vec<TextEntry>>;

    /// Set `value` for an existing `key` and refresh its timestamp.
    /// Returns the number of rows changed; unknown keys change nothing.
    async fn update_text(&self, key: &str, value: &str) -> Result<u64>;
}
