//! Site text types

use crate::validation::{non_empty, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Editable site copy, one row per key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub key: String,
    pub value: Option<String>,
}

/// `PUT` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTextRequest {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTextUpdate {
    pub key: String,
    pub value: String,
}

impl UpdateTextRequest {
    /// `key` must be non-empty; `value` must be present but may be `""`.
    pub fn validate(self) -> Result<ValidatedTextUpdate, ValidationError> {
        match (non_empty(self.key), self.value) {
            (Some(key), Some(value)) => Ok(ValidatedTextUpdate { key, value }),
            _ => Err(ValidationError::MissingTextKeyOrValue),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextListResponse {
    pub texts: BTreeMap<String, Option<String>>,
}

impl FromIterator<TextEntry> for TextListResponse {
    fn from_iter<I: IntoIterator<Item = TextEntry>>(iter: I) -> Self {
        Self {
            texts: iter.into_iter().map(|e| (e.key, e.value)).collect(),
        }
    }
}
