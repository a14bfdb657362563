//! Resource proxy client

use super::{accept_and_content, accept_only};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiResponse, HttpClient, Transport};
use crate::pagination::{Filter, PageRequest, Pager, PagingMode, PagingSettings};
use crate::types::JsonValue;
use crate::url::UrlBuilder;
use crate::version::accept_header;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for `/api` resources
///
/// Single-resource calls send exactly one request. Collection reads go
/// through [`ProxyClient::get_paged`] or one of its mode wrappers.
///
/// ```rust,ignore
/// use ethos_client::{ClientConfig, PageRequest, PagingMode, ProxyClient};
///
/// let client = ProxyClient::from_config(&ClientConfig::from_env()?)?;
/// let request = PageRequest::builder("persons")
///     .version("12")
///     .mode(PagingMode::ToNumRows)
///     .num_rows(250)
///     .build();
/// let pages = client.get_paged(&request).await?;
/// ```
pub struct ProxyClient<T: Transport> {
    transport: T,
    urls: UrlBuilder,
    settings: PagingSettings,
}

impl ProxyClient<HttpClient> {
    /// Build an authenticated client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(HttpClient::from_client_config(config)?, config))
    }
}

impl<T: Transport> ProxyClient<T> {
    /// Create a client over any transport
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            urls: UrlBuilder::new(config.effective_base_url()),
            settings: PagingSettings::from(config),
        }
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL builder for this client's base URL
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Paging settings
    pub fn settings(&self) -> &PagingSettings {
        &self.settings
    }

    fn accept(&self, version: &str) -> Result<String> {
        accept_header(version, &self.settings.default_version)
    }

    // ========================================================================
    // Single requests
    // ========================================================================

    /// Fetch the server's default first page of a resource
    pub async fn get(&self, resource: &str, version: &str) -> Result<ApiResponse> {
        let headers = accept_only(&self.accept(version)?);
        self.transport
            .get(&headers, &self.urls.resource_url(resource))
            .await
    }

    /// Fetch one record by id
    pub async fn get_by_id(&self, resource: &str, id: &str, version: &str) -> Result<ApiResponse> {
        let headers = accept_only(&self.accept(version)?);
        self.transport
            .get(&headers, &self.urls.resource_id_url(resource, id))
            .await
    }

    /// Create a record
    pub async fn post(&self, resource: &str, body: &JsonValue, version: &str) -> Result<ApiResponse> {
        let headers = accept_and_content(&self.accept(version)?);
        let body = serde_json::to_string(body)?;
        self.transport
            .post(&headers, &self.urls.resource_url(resource), &body)
            .await
    }

    /// Replace a record
    pub async fn put(
        &self,
        resource: &str,
        id: &str,
        body: &JsonValue,
        version: &str,
    ) -> Result<ApiResponse> {
        let headers = accept_and_content(&self.accept(version)?);
        let body = serde_json::to_string(body)?;
        self.transport
            .put(&headers, &self.urls.resource_id_url(resource, id), &body)
            .await
    }

    /// Delete a record
    pub async fn delete(&self, resource: &str, id: &str) -> Result<ApiResponse> {
        let headers = accept_only(&self.settings.default_version);
        self.transport
            .delete(&headers, &self.urls.resource_id_url(resource, id))
            .await
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Run one paging call
    ///
    /// Pages come back in request order. A failure on any request fails the
    /// whole call.
    pub async fn get_paged(&self, request: &PageRequest) -> Result<Vec<ApiResponse>> {
        let pages = Pager::new(&self.transport, &self.urls, &self.settings)
            .fetch(request)
            .await?;
        debug!(
            "{}: {} response(s) for {}",
            request.resource_name,
            pages.len(),
            request.mode
        );
        Ok(pages)
    }

    /// Every page of a resource
    pub async fn get_all_pages(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .build(),
        )
        .await
    }

    /// The first `num_pages` pages
    pub async fn get_pages(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
        num_pages: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .num_pages(num_pages)
                .mode(PagingMode::ToNumPages)
                .build(),
        )
        .await
    }

    /// Every page starting at `offset`
    pub async fn get_all_pages_from_offset(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
        offset: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .offset(offset)
                .mode(PagingMode::FromOffset)
                .build(),
        )
        .await
    }

    /// `num_pages` pages starting at `offset`
    pub async fn get_pages_from_offset(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
        offset: i64,
        num_pages: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .offset(offset)
                .num_pages(num_pages)
                .mode(PagingMode::FromOffsetForNumPages)
                .build(),
        )
        .await
    }

    /// The first `num_rows` rows
    pub async fn get_rows(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
        num_rows: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .num_rows(num_rows)
                .mode(PagingMode::ToNumRows)
                .build(),
        )
        .await
    }

    /// `num_rows` rows starting at `offset`
    pub async fn get_rows_from_offset(
        &self,
        resource: &str,
        version: &str,
        page_size: i64,
        offset: i64,
        num_rows: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .page_size(page_size)
                .offset(offset)
                .num_rows(num_rows)
                .mode(PagingMode::FromOffsetForNumRows)
                .build(),
        )
        .await
    }

    /// Every page matching a filter
    pub async fn get_with_filter(
        &self,
        resource: &str,
        version: &str,
        filter: impl Into<Filter>,
        page_size: i64,
    ) -> Result<Vec<ApiResponse>> {
        self.get_paged(
            &PageRequest::builder(resource)
                .version(version)
                .filter(filter)
                .page_size(page_size)
                .build(),
        )
        .await
    }
}

impl<T: Transport> std::fmt::Debug for ProxyClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyClient")
            .field("urls", &self.urls)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Deserialize and flatten the rows of every page
pub fn records<R: DeserializeOwned>(pages: &[ApiResponse]) -> Result<Vec<R>> {
    let mut rows = Vec::new();
    for page in pages {
        for row in page.records()? {
            rows.push(serde_json::from_value(row)?);
        }
    }
    Ok(rows)
}
