//! URL construction
//!
//! Every URL the clients send is produced here. All methods are pure and
//! deterministic for a given base URL.

use crate::pagination::Filter;
use url::form_urlencoded::byte_serialize;

/// Builds API URLs against a single base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    /// Create a builder; a trailing slash on the base URL is dropped
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{resource}`
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/api/{}", self.base_url, resource.trim_matches('/'))
    }

    /// `{base}/api/{resource}/{id}`
    pub fn resource_id_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}", self.resource_url(resource), id.trim_matches('/'))
    }

    /// `{base}/qapi/{resource}`
    pub fn qapi_url(&self, resource: &str) -> String {
        format!("{}/qapi/{}", self.base_url, resource.trim_matches('/'))
    }

    /// URL for the first request against a collection, with the filter but no paging
    ///
    /// QAPI filters travel in the POST body, so the URL is the bare QAPI endpoint.
    pub fn filtered_url(&self, resource: &str, filter: &Filter) -> String {
        match filter {
            Filter::None => self.resource_url(resource),
            Filter::QapiBody(_) => self.qapi_url(resource),
            Filter::Criteria(criteria) => {
                format!("{}?criteria={}", self.resource_url(resource), encode(criteria))
            }
            Filter::NamedQuery(query) | Filter::FilterMap(query) => {
                let query = query.trim_start_matches('?');
                if query.is_empty() {
                    self.resource_url(resource)
                } else {
                    format!("{}?{query}", self.resource_url(resource))
                }
            }
        }
    }

    /// URL for one page of a collection
    pub fn paged_url(
        &self,
        resource: &str,
        filter: &Filter,
        offset: usize,
        page_size: usize,
    ) -> String {
        append_paging(&self.filtered_url(resource, filter), offset, page_size)
    }

    /// `{base}/errors`
    pub fn errors_url(&self) -> String {
        format!("{}/errors", self.base_url)
    }

    /// `{base}/errors/{id}`
    pub fn error_id_url(&self, id: &str) -> String {
        format!("{}/{}", self.errors_url(), id.trim_matches('/'))
    }

    /// `{base}/errors?offset=..&limit=..`
    pub fn errors_paged_url(&self, offset: usize, limit: usize) -> String {
        append_paging(&self.errors_url(), offset, limit)
    }

    /// `{base}/appconfig`
    pub fn app_config_url(&self) -> String {
        format!("{}/appconfig", self.base_url)
    }

    /// `{base}/admin/available-resources`
    pub fn available_resources_url(&self) -> String {
        format!("{}/admin/available-resources", self.base_url)
    }
}

fn append_paging(url: &str, offset: usize, page_size: usize) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}offset={offset}&limit={page_size}")
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
