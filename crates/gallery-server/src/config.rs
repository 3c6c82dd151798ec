//! Server configuration
//!
//! Built once at startup from defaults plus environment variables and then
//! handed to the services explicitly. Field names follow the roles they play;
//! the serde names are the environment variables that feed them.

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "database_url")]
    pub connection_string: String,

    #[serde(rename = "s3_endpoint")]
    pub storage_endpoint: String,

    #[serde(rename = "aws_access_key_id")]
    pub storage_key_id: String,

    #[serde(rename = "aws_secret_access_key")]
    pub storage_secret: String,

    #[serde(rename = "s3_bucket")]
    pub storage_bucket: String,

    #[serde(rename = "s3_region")]
    pub storage_region: String,

    pub cdn_base_url: String,

    /// Account segment of CDN URLs; the access key id when unset
    #[serde(default)]
    pub cdn_account_id: Option<String>,

    pub bind_address: String,

    #[serde(rename = "database_max_connections")]
    pub max_connections: u32,

    pub run_migrations: bool,

    /// Largest accepted upload request body; base64 inflates images by a third
    pub max_upload_bytes: usize,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

impl Settings {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("s3_endpoint", "https://bucket.poehali.dev")?
            .set_default("s3_bucket", "files")?
            .set_default("s3_region", "us-east-1")?
            .set_default("cdn_base_url", "https://cdn.poehali.dev")?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("database_max_connections", 5)?
            .set_default("run_migrations", true)?
            .set_default("max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as i64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn cdn_account(&self) -> &str {
        self.cdn_account_id
            .as_deref()
            .unwrap_or(&self.storage_key_id)
    }

    /// Connection string with any password masked, for logging.
    /// Handles both URL (`postgres://user:pw@host/db`) and key/value
    /// (`host=... password=...`) forms.
    pub fn redacted_connection_string(&self) -> String {
        let dsn = &self.connection_string;
        match (dsn.find("://"), dsn.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &dsn[scheme_end + 3..at];
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}{}:***{}", &dsn[..scheme_end + 3], user, &dsn[at..])
            }
            (Some(_), _) => dsn.clone(),
            (None, _) => dsn
                .split_whitespace()
                .map(|pair| match pair.split_once('=') {
                    Some((key, _)) if key.eq_ignore_ascii_case("password") => {
                        format!("{}=***", key)
                    }
                    _ => pair.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
