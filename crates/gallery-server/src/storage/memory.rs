//! In-memory stores using DashMap
//!
//! Stand-ins for PostgreSQL and S3 in handler and service tests. They keep
//! the same observable contract: newest-first listing, zero-row deletes and
//! updates are not errors, non-numeric ids are rejected like the database
//! rejects them.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use gallery_core::ports::{BlobStore, MemoryStore, TextStore};
use gallery_core::{GalleryError, Memory, NewMemory, Result, TextEntry};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct InMemoryStore {
    memories: Arc<DashMap<i64, Memory>>,
    texts: Arc<DashMap<String, TextRecord>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
    fail_inserts: bool,
}

#[derive(Clone)]
pub struct TextRecord {
    pub value: Option<String>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with a database error
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    /// Provision a text key the way a migration would
    pub fn seed_text(&self, key: &str, value: &str) {
        self.texts.insert(
            key.to_string(),
            TextRecord {
                value: Some(value.to_string()),
                updated_at: Utc::now() - Duration::hours(1),
            },
        );
    }

    pub fn text(&self, key: &str) -> Option<TextRecord> {
        self.texts.get(key).map(|r| r.clone())
    }

    pub fn memory_count(&self) -> usize {
        self.memories.len()
    }

    /// Number of store operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn list_memories(&self) -> Result<Vec<Memory>> {
        self.touch();
        let mut memories: Vec<Memory> = self.memories.iter().map(|e| e.value().clone()).collect();
        // created_at DESC, ties broken by insertion order (newest id first)
        memories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(memories)
    }

    async fn insert_memory(&self, memory: &NewMemory) -> Result<i64> {
        self.touch();
        if self.fail_inserts {
            return Err(GalleryError::Database("insert rejected".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.memories.insert(
            id,
            Memory {
                id,
                title: memory.title.clone(),
                date: memory.date.clone(),
                description: memory.description.clone(),
                image_url: memory.image_url.clone(),
                created_at: Some(Utc::now()),
            },
        );
        Ok(id)
    }

    async fn delete_memory(&self, id: &str) -> Result<u64> {
        self.touch();
        let id: i64 = id.parse().map_err(|_| {
            GalleryError::Database(format!("invalid input syntax for type bigint: \"{}\"", id))
        })?;
        Ok(self.memories.remove(&id).map(|_| 1).unwrap_or(0))
    }
}

#[async_trait]
impl TextStore for InMemoryStore {
    async fn list_texts(&self) -> Result<Vec<TextEntry>> {
        self.touch();
        Ok(self
            .texts
            .iter()
            .map(|e| TextEntry {
                key: e.key().clone(),
                value: e.value().value.clone(),
            })
            .collect())
    }

    async fn update_text(&self, key: &str, value: &str) -> Result<u64> {
        self.touch();
        match self.texts.get_mut(key) {
            Some(mut record) => {
                record.value = Some(value.to_string());
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Object store that keeps bodies in memory
#[derive(Default)]
pub struct InMemoryBlobStore {
    objects: Arc<DashMap<String, (Bytes, String)>>,
    calls: AtomicUsize,
    fail_puts: bool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every put fails with a storage error
    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn object(&self, key: &str) -> Option<(Bytes, String)> {
        self.objects.get(key).map(|o| o.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts {
            return Err(GalleryError::Storage("access denied".to_string()));
        }
        self.objects
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.objects.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_memory(title: &str) -> NewMemory {
        NewMemory {
            title: title.to_string(),
            date: "2024-05-01".to_string(),
            description: None,
            image_url: format!("https://cdn.test/{}.jpg", title),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryStore::new();
        let first = store.insert_memory(&new_memory("first")).await.unwrap();
        let second = store.insert_memory(&new_memory("second")).await.unwrap();

        let ids: Vec<i64> = store
            .list_memories()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_delete_counts_rows() {
        let store = InMemoryStore::new();
        let id = store.insert_memory(&new_memory("a")).await.unwrap();

        assert_eq!(store.delete_memory("999").await.unwrap(), 0);
        assert_eq!(store.delete_memory(&id.to_string()).await.unwrap(), 1);
        assert_eq!(store.memory_count(), 0);
        assert!(store.delete_memory("abc").await.is_err());
    }

    #[tokio::test]
    async fn test_update_text_only_touches_existing_keys() {
        let store = InMemoryStore::new();
        store.seed_text("title", "old");

        assert_eq!(store.update_text("title", "new").await.unwrap(), 1);
        assert_eq!(store.update_text("missing", "x").await.unwrap(), 0);
        assert_eq!(store.text("title").unwrap().value.as_deref(), Some("new"));
        assert!(store.text("missing").is_none());
    }
}
