//! Authenticator implementation
//!
//! Handles the API key exchange and token caching.

use super::types::CachedToken;
use crate::error::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Issues bearer tokens for an application API key
pub struct Authenticator {
    /// Application API key
    api_key: String,
    /// Token endpoint, including the expiration query
    auth_url: String,
    /// Requested token lifetime
    expiration_minutes: u32,
    /// Cached token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator for the given base URL
    pub fn new(api_key: impl Into<String>, base_url: &str, expiration_minutes: u32) -> Self {
        Self::with_client(api_key, base_url, expiration_minutes, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(
        api_key: impl Into<String>,
        base_url: &str,
        expiration_minutes: u32,
        http_client: Client,
    ) -> Self {
        let auth_url = format!(
            "{}/auth?expirationMinutes={expiration_minutes}",
            base_url.trim_end_matches('/')
        );
        Self {
            api_key: api_key.into(),
            auth_url,
            expiration_minutes,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Token endpoint URL
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Get a valid token, refreshing if necessary
    pub async fn token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Drop the cached token so the next call fetches a new one
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    async fn fetch_new_token(&self) -> Result<CachedToken> {
        if self.api_key.trim().is_empty() {
            return Err(Error::auth("API key is blank"));
        }

        debug!("Requesting bearer token from {}", self.auth_url);
        let response = self
            .http_client
            .post(&self.auth_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token = response.text().await.map_err(Error::Http)?.trim().to_string();
        if token.is_empty() {
            return Err(Error::auth("Token endpoint returned an empty body"));
        }

        let lifetime_seconds = i64::from(self.expiration_minutes) * 60;
        Ok(CachedToken::from_raw(token, lifetime_seconds))
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_url", &self.auth_url)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish_non_exhaustive()
    }
}
