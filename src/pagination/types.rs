//! Pagination types
//!
//! Defines the caller-facing paging request and the state discovered by the
//! probe request.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter applied to a collection request
///
/// At most one filter is active per request. Rendered filters are opaque to
/// the pager; see [`crate::filter`] for builders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Plain listing
    #[default]
    None,
    /// Criteria JSON, sent as `?criteria=`
    Criteria(String),
    /// Rendered named query (`name=json`)
    NamedQuery(String),
    /// Rendered `key=value` pairs
    FilterMap(String),
    /// QAPI request body, sent with POST
    QapiBody(String),
}

impl Filter {
    /// Check if no filter is active
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if requests go to the QAPI endpoint
    pub fn is_qapi(&self) -> bool {
        matches!(self, Self::QapiBody(_))
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Criteria(_) => "criteria",
            Self::NamedQuery(_) => "named-query",
            Self::FilterMap(_) => "filter-map",
            Self::QapiBody(_) => "qapi",
        }
    }
}

/// Shape of the result a paging call produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagingMode {
    /// Every page of the collection
    #[default]
    AllPages,
    /// The first `num_pages` pages
    ToNumPages,
    /// Every page starting at `offset`
    FromOffset,
    /// `num_pages` pages starting at `offset`
    FromOffsetForNumPages,
    /// The first `num_rows` rows
    ToNumRows,
    /// `num_rows` rows starting at `offset`
    FromOffsetForNumRows,
}

impl PagingMode {
    /// All modes, in declaration order
    pub const ALL: [PagingMode; 6] = [
        PagingMode::AllPages,
        PagingMode::ToNumPages,
        PagingMode::FromOffset,
        PagingMode::FromOffsetForNumPages,
        PagingMode::ToNumRows,
        PagingMode::FromOffsetForNumRows,
    ];

    /// Modes bounded by a row count rather than pages
    pub fn is_row_bounded(self) -> bool {
        matches!(self, Self::ToNumRows | Self::FromOffsetForNumRows)
    }

    /// Modes that honor the caller's offset
    pub fn uses_offset(self) -> bool {
        matches!(
            self,
            Self::FromOffset | Self::FromOffsetForNumPages | Self::FromOffsetForNumRows
        )
    }

    /// Kebab-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllPages => "all-pages",
            Self::ToNumPages => "to-num-pages",
            Self::FromOffset => "from-offset",
            Self::FromOffsetForNumPages => "from-offset-for-num-pages",
            Self::ToNumRows => "to-num-rows",
            Self::FromOffsetForNumRows => "from-offset-for-num-rows",
        }
    }
}

impl fmt::Display for PagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PagingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                Error::invalid_argument("mode", format!("unknown paging mode '{s}'"))
            })
    }
}

/// A caller's paging intent
///
/// Built fresh for every paging call. Signed inputs follow the platform
/// convention: a page size `<= 0` means "derive it", an offset `< 1` means
/// zero and page/row counts `< 1` mean unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Collection name, e.g. `persons`
    pub resource_name: String,
    /// Requested version; blank means the default
    pub version: String,
    /// Active filter
    pub filter: Filter,
    /// Requested page size, `None` to derive it from the probe
    pub page_size: Option<usize>,
    /// Starting row for offset modes
    pub offset: usize,
    /// Page bound for page modes, `None` for unbounded
    pub num_pages: Option<usize>,
    /// Row bound for row modes, `None` for unbounded
    pub num_rows: Option<usize>,
    /// Result shape
    pub mode: PagingMode,
}

impl PageRequest {
    /// Start building a request for a collection
    pub fn builder(resource_name: impl Into<String>) -> PageRequestBuilder {
        PageRequestBuilder {
            request: PageRequest {
                resource_name: resource_name.into(),
                ..Default::default()
            },
        }
    }
}

/// Builder for [`PageRequest`]
#[derive(Debug, Clone)]
pub struct PageRequestBuilder {
    request: PageRequest,
}

impl PageRequestBuilder {
    /// Set the version
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.request.version = version.into();
        self
    }

    /// Set the filter, replacing any other
    #[must_use]
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.request.filter = filter.into();
        self
    }

    /// Set the page size; `<= 0` derives it from the server
    #[must_use]
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.request.page_size = positive(page_size);
        self
    }

    /// Set the offset; `< 1` is zero
    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.request.offset = positive(offset).unwrap_or(0);
        self
    }

    /// Set the page bound; `< 1` is unbounded
    #[must_use]
    pub fn num_pages(mut self, num_pages: i64) -> Self {
        self.request.num_pages = positive(num_pages);
        self
    }

    /// Set the row bound; `< 1` is unbounded
    #[must_use]
    pub fn num_rows(mut self, num_rows: i64) -> Self {
        self.request.num_rows = positive(num_rows);
        self
    }

    /// Set the paging mode
    #[must_use]
    pub fn mode(mut self, mode: PagingMode) -> Self {
        self.request.mode = mode;
        self
    }

    /// Finish the request
    pub fn build(self) -> PageRequest {
        self.request
    }
}

fn positive(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v > 0)
}

/// Settings the pager reads from the client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingSettings {
    /// Accept header for blank versions
    pub default_version: String,
    /// Largest page size the pager derives on its own
    pub max_page_size: usize,
    /// Total count header name
    pub total_count_header: String,
    /// Max page size header name
    pub max_page_size_header: String,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for PagingSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            default_version: config.default_version.clone(),
            max_page_size: config.max_page_size.max(1),
            total_count_header: config.total_count_header.clone(),
            max_page_size_header: config.max_page_size_header.clone(),
        }
    }
}

/// Everything learned from the probe request
#[derive(Debug, Clone)]
pub struct PreparedPaging {
    /// Resolved Accept header
    pub accept: String,
    /// Normalized offset
    pub offset: usize,
    /// Resolved page size, always greater than zero
    pub page_size: usize,
    /// Rows available for the resource and filter; zero when unknown
    pub total_count: usize,
    /// Whether more than the probe is needed
    pub should_page: bool,
    /// The probe response, reused when paging is not needed
    pub probe: ApiResponse,
}

/// Decide whether multi-request paging is needed
///
/// True iff one page cannot hold `target_count` rows.
pub fn should_page(page_size: usize, target_count: usize) -> bool {
    page_size < target_count
}

/// Row count the paging decision is measured against
///
/// Row-bounded modes are measured against their row bound; every other mode
/// against the collection's total.
pub fn decision_target(request: &PageRequest, total_count: usize) -> usize {
    match (request.mode.is_row_bounded(), request.num_rows) {
        (true, Some(rows)) => rows,
        _ => total_count,
    }
}
