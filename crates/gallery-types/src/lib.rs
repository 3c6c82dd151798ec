//! Gallery Types - Pure type definitions
//!
//! Domain records, request schemas and response bodies shared by the
//! gallery crates. Nothing here touches a database, a bucket or a socket.

pub mod memory;
pub mod text;
pub mod validation;

pub use memory::*;
pub use text::*;
pub use validation::ValidationError;

use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generic `{"error": ...}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
