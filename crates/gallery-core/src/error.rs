//! Error types for the gallery

use gallery_types::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl GalleryError {
    /// Faults are everything the caller cannot fix by changing the request.
    pub fn is_fault(&self) -> bool {
        !matches!(
            self,
            GalleryError::Validation(_)
                | GalleryError::MethodNotAllowed
                | GalleryError::PayloadTooLarge
                | GalleryError::MalformedRequest(_)
        )
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::Serialization(e.to_string())
    }
}

impl From<base64::DecodeError> for GalleryError {
    fn from(e: base64::DecodeError) -> Self {
        GalleryError::Decode(e.to_string())
    }
}
