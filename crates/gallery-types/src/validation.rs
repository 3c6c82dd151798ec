//! Request validation outcomes

use thiserror::Error;

/// Reason a request was rejected before any side effect ran.
///
/// The `Display` text is the exact `error` string returned to clients.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingMemoryFields,

    #[error("Missing memory id")]
    MissingMemoryId,

    #[error("Missing key or value")]
    MissingTextKeyOrValue,
}

/// Present and non-empty
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
