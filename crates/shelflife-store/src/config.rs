//! # Remote Store Configuration
//!
//! Configuration for the hosted backend connection.
//!
//! Loaded from environment variables with builder-style overrides. The CLI
//! merges its own flags on top; library users construct the config directly.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable naming the backend base URL.
pub const ENV_URL: &str = "SHELFLIFE_URL";

/// Environment variable naming the service key.
pub const ENV_SERVICE_KEY: &str = "SHELFLIFE_SERVICE_KEY";

/// Environment variable overriding the product table name.
pub const ENV_TABLE: &str = "SHELFLIFE_TABLE";

/// Environment variable overriding the image bucket name.
pub const ENV_BUCKET: &str = "SHELFLIFE_BUCKET";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

// =============================================================================
// Remote Config
// =============================================================================

/// Connection settings for the hosted table + object storage service.
///
/// ## Example
/// ```rust
/// use shelflife_store::RemoteConfig;
///
/// let config = RemoteConfig::new("https://xyz.example.co", "service-key")
///     .bucket("product-images")
///     .table("Product");
/// ```
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted service, without a trailing slash.
    pub base_url: String,

    /// Service key, sent as both the `apikey` header and the bearer token.
    pub service_key: String,

    /// Product table name.
    /// Default: "Product"
    pub table: String,

    /// Object-storage bucket holding product images.
    /// Default: "product-images"
    pub bucket: String,

    /// Per-request timeout for the HTTP client.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl RemoteConfig {
    /// Creates a configuration with the given base URL and service key.
    ///
    /// A trailing slash on the base URL is trimmed so endpoint paths can be
    /// appended uniformly.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemoteConfig {
            base_url,
            service_key: service_key.into(),
            table: "Product".to_string(),
            bucket: "product-images".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the product table name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the image bucket name.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `SHELFLIFE_URL` and `SHELFLIFE_SERVICE_KEY` are required;
    /// `SHELFLIFE_TABLE` and `SHELFLIFE_BUCKET` override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(ENV_URL).map_err(|_| ConfigError::Missing(ENV_URL))?;
        let service_key =
            env::var(ENV_SERVICE_KEY).map_err(|_| ConfigError::Missing(ENV_SERVICE_KEY))?;

        let mut config = RemoteConfig::new(base_url, service_key);
        if let Ok(table) = env::var(ENV_TABLE) {
            config = config.table(table);
        }
        if let Ok(bucket) = env::var(ENV_BUCKET) {
            config = config.bucket(bucket);
        }

        Ok(config)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
