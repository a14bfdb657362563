//! HTTP client and transport trait
//!
//! `Transport` is the only I/O boundary the pager and the typed clients
//! depend on. `HttpClient` is the production implementation:
//! - Bearer token authentication via [`Authenticator`]
//! - Optional rate limiting
//! - Non-2xx responses turned into [`Error::HttpStatus`]

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::response::ApiResponse;
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Asynchronous request capability
///
/// Each call sends one request and resolves with the buffered response.
/// Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request
    async fn get(&self, headers: &StringMap, url: &str) -> Result<ApiResponse>;

    /// Send a POST request with a JSON body
    async fn post(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse>;

    /// Send a PUT request with a JSON body
    async fn put(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse>;

    /// Send a DELETE request
    async fn delete(&self, headers: &StringMap, url: &str) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, headers: &StringMap, url: &str) -> Result<ApiResponse> {
        (**self).get(headers, url).await
    }

    async fn post(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse> {
        (**self).post(headers, url, body).await
    }

    async fn put(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse> {
        (**self).put(headers, url, body).await
    }

    async fn delete(&self, headers: &StringMap, url: &str) -> Result<ApiResponse> {
        (**self).delete(headers, url).await
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: StringMap::new(),
            user_agent: format!("ethos-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

impl From<&ClientConfig> for HttpClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout(),
            rate_limit: config.rate_limit.clone(),
            default_headers: StringMap::new(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// reqwest-backed [`Transport`]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Create a client from a [`ClientConfig`], authenticating when it has an API key
    pub fn from_client_config(config: &ClientConfig) -> Result<Self> {
        let mut client = Self::with_config(HttpClientConfig::from(config))?;
        if let Some(api_key) = config.api_key.as_deref() {
            let authenticator = Authenticator::with_client(
                api_key,
                &config.effective_base_url(),
                config.token_expiration_minutes,
                client.client.clone(),
            );
            client.authenticator = Some(authenticator);
        }
        Ok(client)
    }

    /// Attach an authenticator
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send a request and buffer the response
    pub async fn request(
        &self,
        method: Method,
        headers: &StringMap,
        url: &str,
        body: Option<&str>,
    ) -> Result<ApiResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.into(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            let has_content_type = headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if !has_content_type {
                req = req.header(CONTENT_TYPE, "application/json");
            }
            req = req.body(body.to_string());
        }

        if let Some(ref auth) = self.authenticator {
            req = req.bearer_auth(auth.token().await?);
        }

        let response = ApiResponse::from_reqwest(req.send().await?).await?;

        if !response.is_success() {
            warn!("{} {} failed with {}", method, url, response.status);
            return Err(Error::http_status(response.status, response.content));
        }

        debug!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, headers: &StringMap, url: &str) -> Result<ApiResponse> {
        self.request(Method::GET, headers, url, None).await
    }

    async fn post(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse> {
        self.request(Method::POST, headers, url, Some(body)).await
    }

    async fn put(&self, headers: &StringMap, url: &str, body: &str) -> Result<ApiResponse> {
        self.request(Method::PUT, headers, url, Some(body)).await
    }

    async fn delete(&self, headers: &StringMap, url: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, headers, url, None).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
