//! Memory service
//!
//! Orchestrates the two side effects of an upload: the image goes to the
//! bucket first, then the row is inserted. If the insert fails the object
//! is deleted again so no orphan is left behind.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use gallery_core::ports::{BlobStore, MemoryStore};
use gallery_core::{
    cdn_url, image_object_key, Memory, NewMemory, Result, UploadMemoryResponse, ValidatedUpload,
    IMAGE_CONTENT_TYPE,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Where uploaded objects become publicly reachable
#[derive(Debug, Clone)]
pub struct CdnLocation {
    pub base_url: String,
    pub account_id: String,
}

impl CdnLocation {
    pub fn url_for(&self, object_key: &str) -> String {
        cdn_url(&self.base_url, &self.account_id, object_key)
    }
}

pub struct MemoryService {
    store: Arc<dyn MemoryStore>,
    blobs: Arc<dyn BlobStore>,
    cdn: CdnLocation,
}

impl MemoryService {
    pub fn new(store: Arc<dyn MemoryStore>, blobs: Arc<dyn BlobStore>, cdn: CdnLocation) -> Self {
        Self { store, blobs, cdn }
    }

    pub async fn list(&self) -> Result<Vec<Memory>> {
        let memories = self.store.list_memories().await?;
        debug!("Listed {} memories", memories.len());
        Ok(memories)
    }

    pub async fn upload(&self, upload: ValidatedUpload) -> Result<UploadMemoryResponse> {
        self.upload_at(upload, Utc::now()).await
    }

    /// Upload with an explicit timestamp for the object key
    pub async fn upload_at(
        &self,
        upload: ValidatedUpload,
        at: DateTime<Utc>,
    ) -> Result<UploadMemoryResponse> {
        let image = Bytes::from(STANDARD.decode(upload.image_base64.as_bytes())?);

        let object_key = image_object_key(at);
        let image_url = self.cdn.url_for(&object_key);

        self.blobs
            .put_object(&object_key, image, IMAGE_CONTENT_TYPE)
            .await?;

        let row = NewMemory {
            title: upload.title,
            date: upload.date,
            description: upload.description,
            image_url: image_url.clone(),
        };

        let id = match self.store.insert_memory(&row).await {
            Ok(id) => id,
            Err(e) => {
                error!("Insert failed after storing {}: {}", object_key, e);
                if let Err(cleanup) = self.blobs.delete_object(&object_key).await {
                    warn!("Failed to remove orphaned object {}: {}", object_key, cleanup);
                }
                return Err(e);
            }
        };

        info!("Memory {} uploaded as {}", id, object_key);

        Ok(UploadMemoryResponse {
            id,
            image_url,
            message: "Photo uploaded successfully".to_string(),
        })
    }

    /// Succeeds whether or not a row matched
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.store.delete_memory(id).await?;
        debug!("Delete memory {}: {} row(s) removed", id, removed);
        Ok(())
    }
}
