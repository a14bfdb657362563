//! Client configuration
//!
//! `ClientConfig` can be built programmatically, loaded from a YAML file,
//! or assembled from environment variables.
//!
//! ```yaml
//! api_key: "11111111-2222-3333-4444-555555555555"
//! region: canada
//! max_page_size: 250
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::types::{OptionStringExt, Region};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Accept header used when a caller does not ask for a specific version
pub const DEFAULT_VERSION: &str = "application/json";

/// Largest page size requested when neither the caller nor the server say otherwise
pub const DEFAULT_MAX_PAGE_SIZE: usize = 500;

/// Header carrying the total number of rows in a collection
pub const HDR_TOTAL_COUNT: &str = "x-total-count";

/// Header carrying the largest page size the server accepts
pub const HDR_MAX_PAGE_SIZE: &str = "x-max-page-size";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ETHOS_API_KEY";

/// Environment variable holding the region
pub const ENV_REGION: &str = "ETHOS_REGION";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "ETHOS_BASE_URL";

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application API key, exchanged for bearer tokens
    #[serde(default)]
    pub api_key: Option<String>,

    /// Hosting region
    #[serde(default)]
    pub region: Region,

    /// Explicit base URL (overrides the region's gateway)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept header used for blank versions
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Upper bound for derived page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Name of the total count response header
    #[serde(default = "default_total_count_header")]
    pub total_count_header: String,

    /// Name of the max page size response header
    #[serde(default = "default_max_page_size_header")]
    pub max_page_size_header: String,

    /// Requested token lifetime in minutes
    #[serde(default = "default_token_expiration_minutes")]
    pub token_expiration_minutes: u32,

    /// Optional client-side throttling
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ethos-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_total_count_header() -> String {
    HDR_TOTAL_COUNT.to_string()
}

fn default_max_page_size_header() -> String {
    HDR_MAX_PAGE_SIZE.to_string()
}

fn default_token_expiration_minutes() -> u32 {
    60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            region: Region::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            default_version: default_version(),
            max_page_size: default_max_page_size(),
            total_count_header: default_total_count_header(),
            max_page_size_header: default_max_page_size_header(),
            token_expiration_minutes: default_token_expiration_minutes(),
            rate_limit: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given API key with all defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a config from `ETHOS_API_KEY`, `ETHOS_REGION` and `ETHOS_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .none_if_blank()
            .ok_or_else(|| Error::missing_field(ENV_API_KEY))?;

        let mut config = Self::new(api_key);
        if let Some(region) = std::env::var(ENV_REGION).ok().none_if_blank() {
            config.region = region.parse()?;
        }
        config.base_url = std::env::var(ENV_BASE_URL).ok().none_if_blank();
        Ok(config)
    }

    /// Set the region
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the max page size
    #[must_use]
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Enable client-side rate limiting
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Effective base URL, without a trailing slash
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .none_if_blank()
            .unwrap_or_else(|| self.region.base_url().to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(Error::config("max_page_size must be greater than zero"));
        }
        if self.total_count_header.trim().is_empty() {
            return Err(Error::missing_field("total_count_header"));
        }
        if self.max_page_size_header.trim().is_empty() {
            return Err(Error::missing_field("max_page_size_header"));
        }
        if let Some(base) = &self.base_url {
            url::Url::parse(base)?;
        }
        Ok(())
    }
}
