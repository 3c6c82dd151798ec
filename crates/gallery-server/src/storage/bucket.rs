//! S3-compatible bucket storage

use crate::config::Settings;
use async_trait::async_trait;
use bytes::Bytes;
use gallery_core::ports::BlobStore;
use gallery_core::{GalleryError, Result};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

pub struct S3BlobStore {
    bucket: Box<Bucket>,
}

impl S3BlobStore {
    pub fn new(settings: &Settings) -> Result<Self> {
        let region = Region::Custom {
            region: settings.storage_region.clone(),
            endpoint: settings.storage_endpoint.clone(),
        };

        let credentials = Credentials::new(
            Some(settings.storage_key_id.as_str()),
            Some(settings.storage_secret.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| GalleryError::Config(format!("Invalid storage credentials: {}", e)))?;

        let bucket = Bucket::new(&settings.storage_bucket, region, credentials)
            .map_err(storage_error)?
            .with_path_style();

        tracing::info!(
            "Object storage configured: endpoint={}, bucket={}",
            settings.storage_endpoint,
            settings.storage_bucket
        );

        Ok(Self { bucket })
    }
}

fn storage_error(e: S3Error) -> GalleryError {
    GalleryError::Storage(e.to_string())
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &body, content_type)
            .await
            .map_err(storage_error)?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(GalleryError::Storage(format!(
                "put_object {} returned HTTP {}",
                key, status
            )));
        }

        tracing::debug!("Stored object {} ({} bytes)", key, body.len());
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(storage_error)?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(GalleryError::Storage(format!(
                "delete_object {} returned HTTP {}",
                key, status
            )));
        }

        tracing::debug!("Deleted object {}", key);
        Ok(())
    }
}
