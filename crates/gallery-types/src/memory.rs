//! Memory types
//!
//! A memory is one photo in the gallery: caller-supplied title, date and
//! description plus the CDN URL of the uploaded image.

use crate::validation::{non_empty, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Namespace every uploaded image lives under
pub const IMAGE_KEY_PREFIX: &str = "memories/";

/// Extension appended to every uploaded image key
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Content type sent with every uploaded image
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Stored memory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub image_url: String,
    #[serde(with = "rfc3339_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row to insert; id and created_at are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemory {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub image_url: String,
}

/// `POST` body. Every field is optional at the schema level so that
/// missing fields surface as a validation error rather than a parse error.
///
/// `description` keeps absent (`None`) apart from an explicit `null`
/// (`Some(None)`): absent is stored as `""`, `null` as NULL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadMemoryRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub image: Option<String>,
}

/// Any value that made it into the payload, `null` included
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Upload request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    /// Base64 payload with any data-URL header already stripped
    pub image_base64: String,
}

impl UploadMemoryRequest {
    pub fn validate(self) -> Result<ValidatedUpload, ValidationError> {
        let title = non_empty(self.title);
        let date = non_empty(self.date);
        let image = non_empty(self.image);

        match (title, date, image) {
            (Some(title), Some(date), Some(image)) => Ok(ValidatedUpload {
                title,
                date,
                description: self.description.unwrap_or_else(|| Some(String::new())),
                image_base64: strip_data_url(&image).to_string(),
            }),
            _ => Err(ValidationError::MissingMemoryFields),
        }
    }
}

/// `DELETE` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteMemoryQuery {
    pub id: Option<String>,
}

/// The first `id` in the query wins; later repeats are ignored.
impl FromIterator<(String, String)> for DeleteMemoryQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            id: iter
                .into_iter()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value),
        }
    }
}

impl DeleteMemoryQuery {
    /// The id is only checked for presence; the store decides what it matches.
    pub fn validate(self) -> Result<String, ValidationError> {
        non_empty(self.id).ok_or(ValidationError::MissingMemoryId)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryListResponse {
    pub memories: Vec<Memory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMemoryResponse {
    pub id: i64,
    pub image_url: String,
    pub message: String,
}

/// Drop a `data:<mime>;base64,` style header if one is present.
///
/// Everything up to and including the first comma is removed; a payload
/// without a comma is returned unchanged.
pub fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

/// Object key for an image uploaded at `at`
pub fn image_object_key(at: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        IMAGE_KEY_PREFIX,
        at.format("%Y%m%d_%H%M%S_%3f"),
        IMAGE_EXTENSION
    )
}

/// Public CDN URL for an object key
pub fn cdn_url(base_url: &str, account_id: &str, object_key: &str) -> String {
    format!(
        "{}/projects/{}/bucket/{}",
        base_url.trim_end_matches('/'),
        account_id,
        object_key
    )
}

mod rfc3339_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}
