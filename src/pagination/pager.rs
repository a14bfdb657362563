//! Pager
//!
//! Runs one paging call: probe, decide, then walk or trim.

use super::strategies::{trim, WalkPlan};
use super::types::{
    decision_target, should_page, Filter, PageRequest, PagingSettings, PreparedPaging,
};
use crate::error::{Error, Result};
use crate::http::{ApiResponse, Transport};
use crate::types::StringMap;
use crate::url::UrlBuilder;
use crate::version::accept_header;
use tracing::{debug, info};

/// Sequential pager over a [`Transport`]
pub struct Pager<'a, T: Transport + ?Sized> {
    transport: &'a T,
    urls: &'a UrlBuilder,
    settings: &'a PagingSettings,
}

impl<'a, T: Transport + ?Sized> Pager<'a, T> {
    /// Create a pager
    pub fn new(transport: &'a T, urls: &'a UrlBuilder, settings: &'a PagingSettings) -> Self {
        Self {
            transport,
            urls,
            settings,
        }
    }

    /// Fetch the pages a request asks for, in request order
    ///
    /// When the probe already holds everything, the result is the single
    /// trimmed probe response and no further request is made.
    pub async fn fetch(&self, request: &PageRequest) -> Result<Vec<ApiResponse>> {
        let prepared = self.prepare(request).await?;
        // An unknown total plans zero requests; the probe is all we have
        if prepared.should_page && prepared.total_count > 0 {
            return self.walk(request, &prepared).await;
        }

        debug!(
            "{}: probe holds all requested rows, trimming for {}",
            request.resource_name, request.mode
        );
        Ok(vec![trim(request, &prepared.probe)?])
    }

    /// Issue the probe request and resolve version, offset, total count and page size
    pub async fn prepare(&self, request: &PageRequest) -> Result<PreparedPaging> {
        if request.resource_name.trim().is_empty() {
            return Err(Error::invalid_argument(
                "resource_name",
                "must not be blank",
            ));
        }

        let accept = accept_header(&request.version, &self.settings.default_version)?;
        let headers = accept_headers(&accept);
        let url = self
            .urls
            .filtered_url(&request.resource_name, &request.filter);

        let probe = self.send(&headers, &url, &request.filter).await?;

        let total_count = probe
            .header_as::<usize>(&self.settings.total_count_header)
            .unwrap_or(0);
        let page_size = match request.page_size {
            Some(size) => size,
            None => self.derive_page_size(&probe)?,
        };
        let should_page = should_page(page_size, decision_target(request, total_count));

        info!(
            "{} (filter: {}): total={} page_size={} mode={} paging={}",
            request.resource_name,
            request.filter.kind(),
            total_count,
            page_size,
            request.mode,
            should_page
        );

        Ok(PreparedPaging {
            accept,
            offset: request.offset,
            page_size,
            total_count,
            should_page,
            probe,
        })
    }

    /// Walk the collection with one request per page
    pub async fn walk(
        &self,
        request: &PageRequest,
        prepared: &PreparedPaging,
    ) -> Result<Vec<ApiResponse>> {
        let plan = WalkPlan::for_mode(request, prepared.page_size, prepared.total_count);
        debug!(
            "{}: walking from offset {} with up to {} requests",
            request.resource_name, plan.start_offset, plan.request_count
        );

        let headers = accept_headers(&prepared.accept);
        let mut responses = Vec::new();
        let mut offset = plan.start_offset;

        for index in 0..plan.request_count {
            let size = plan.page_size_at(index, offset, prepared.page_size);
            let url = self
                .urls
                .paged_url(&request.resource_name, &request.filter, offset, size);
            debug!("Page {}: offset={} limit={}", index + 1, offset, size);

            responses.push(self.send(&headers, &url, &request.filter).await?);

            offset += prepared.page_size;
            if offset >= prepared.total_count {
                break;
            }
        }

        Ok(responses)
    }

    /// Page size when the caller left it open
    ///
    /// A max-page-size header below the configured maximum wins, then the
    /// length of the probe's own page, then the configured maximum.
    fn derive_page_size(&self, probe: &ApiResponse) -> Result<usize> {
        let max = self.settings.max_page_size;
        if let Some(server_max) = probe
            .header_as::<usize>(&self.settings.max_page_size_header)
            .filter(|size| *size > 0 && *size < max)
        {
            return Ok(server_max);
        }

        let rows = probe.records()?.len();
        Ok(if rows > 0 { rows } else { max })
    }

    async fn send(&self, headers: &StringMap, url: &str, filter: &Filter) -> Result<ApiResponse> {
        match filter {
            Filter::QapiBody(body) => self.transport.post(headers, url, body).await,
            _ => self.transport.get(headers, url).await,
        }
    }
}

fn accept_headers(accept: &str) -> StringMap {
    let mut headers = StringMap::new();
    headers.insert("Accept".to_string(), accept.to_string());
    headers
}
