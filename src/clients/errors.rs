//! Errors API client

use super::{accept_and_content, accept_only};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, HttpClient, Transport};
use crate::types::JsonValue;
use crate::url::UrlBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Media type of the errors API
pub const ERRORS_MEDIA_TYPE: &str = "application/vnd.hedtech.errors.v2+json";

/// One entry of the tenant error log
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Error id, assigned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Severity, e.g. `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// HTTP status the failure produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Application that reported the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Correlation id for tracing the failure across systems
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Any other fields
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Client for `/errors`
pub struct ErrorsClient<T: Transport> {
    transport: T,
    urls: UrlBuilder,
    total_count_header: String,
}

impl ErrorsClient<HttpClient> {
    /// Build an authenticated client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(HttpClient::from_client_config(config)?, config))
    }
}

impl<T: Transport> ErrorsClient<T> {
    /// Create a client over any transport
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            urls: UrlBuilder::new(config.effective_base_url()),
            total_count_header: config.total_count_header.clone(),
        }
    }

    /// One page of errors
    pub async fn get(&self, offset: usize, limit: usize) -> Result<ApiResponse> {
        if limit == 0 {
            return Err(Error::invalid_argument("limit", "must be greater than zero"));
        }
        self.transport
            .get(
                &accept_only(ERRORS_MEDIA_TYPE),
                &self.urls.errors_paged_url(offset, limit),
            )
            .await
    }

    /// One error by id
    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse> {
        self.transport
            .get(&accept_only(ERRORS_MEDIA_TYPE), &self.urls.error_id_url(id))
            .await
    }

    /// Number of errors in the log
    pub async fn count(&self) -> Result<usize> {
        let response = self.get(0, 1).await?;
        response
            .header_as::<usize>(&self.total_count_header)
            .ok_or_else(|| {
                Error::invalid_header(
                    self.total_count_header.clone(),
                    "missing or not a number",
                )
            })
    }

    /// Report an error
    pub async fn post(&self, record: &ErrorRecord) -> Result<ApiResponse> {
        let body = serde_json::to_string(record)?;
        self.transport
            .post(
                &accept_and_content(ERRORS_MEDIA_TYPE),
                &self.urls.errors_url(),
                &body,
            )
            .await
    }

    /// Remove an error by id
    pub async fn delete(&self, id: &str) -> Result<ApiResponse> {
        self.transport
            .delete(&accept_only(ERRORS_MEDIA_TYPE), &self.urls.error_id_url(id))
            .await
    }
}
