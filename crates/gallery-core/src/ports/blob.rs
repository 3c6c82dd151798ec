//! Object storage port

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// S3-style object store
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;

    async fn delete_object(&self, key: &str) -> Result<()>;
}
