//! Gallery Core Library
//!
//! Error taxonomy and the storage ports the gallery service is written
//! against.

// Re-export pure types from gallery-types
pub use gallery_types::*;

pub mod error;
pub mod ports;

pub use error::{GalleryError, Result};
