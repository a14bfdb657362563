//! Typed API clients
//!
//! Each client wraps a [`Transport`](crate::http::Transport) and a
//! [`UrlBuilder`](crate::url::UrlBuilder):
//! - [`ProxyClient`] - resource CRUD and paging
//! - [`ErrorsClient`] - the tenant error log
//! - [`DiscoveryClient`] - application config and available resources

mod discovery;
mod errors;
mod proxy;

pub use discovery::{AvailableApplication, AvailableResource, DiscoveryClient, Representation};
pub use errors::{ErrorRecord, ErrorsClient, ERRORS_MEDIA_TYPE};
pub use proxy::{records, ProxyClient};

use crate::types::StringMap;

pub(crate) fn accept_only(accept: &str) -> StringMap {
    let mut headers = StringMap::new();
    headers.insert("Accept".to_string(), accept.to_string());
    headers
}

pub(crate) fn accept_and_content(media_type: &str) -> StringMap {
    let mut headers = accept_only(media_type);
    headers.insert("Content-Type".to_string(), media_type.to_string());
    headers
}
