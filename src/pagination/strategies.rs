//! Paging mode strategies
//!
//! Each mode is expressed as a [`WalkPlan`] driving one shared offset loop,
//! plus a trim rule applied to the probe response when no paging is needed.

use super::types::{PageRequest, PagingMode};
use crate::error::Result;
use crate::http::ApiResponse;

// ============================================================================
// Walk Plans
// ============================================================================

/// Parameters of the sequential offset walk for one paging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkPlan {
    /// Offset of the first request
    pub start_offset: usize,
    /// Upper bound on requests issued
    pub request_count: usize,
    /// Rows wanted in total; set for row modes so the last page can shrink
    pub row_target: Option<usize>,
}

impl WalkPlan {
    /// Plan the walk for a request's mode
    ///
    /// `page_size` must be greater than zero.
    pub fn for_mode(request: &PageRequest, page_size: usize, total_count: usize) -> Self {
        let offset = request.offset;
        let pages_between = |start: usize| total_count.saturating_sub(start).div_ceil(page_size);
        let rows = request
            .num_rows
            .map_or(total_count, |rows| rows.min(total_count));

        // A page bound never exceeds the pages the collection actually has
        let bounded = |start: usize| {
            let available = pages_between(start);
            request.num_pages.map_or(available, |pages| pages.min(available))
        };

        match request.mode {
            PagingMode::AllPages => Self::pages(0, pages_between(0)),
            PagingMode::FromOffset => Self::pages(offset, pages_between(offset)),
            PagingMode::ToNumPages => Self::pages(0, bounded(0)),
            PagingMode::FromOffsetForNumPages => Self::pages(offset, bounded(offset)),
            PagingMode::ToNumRows => Self::rows(0, rows, page_size),
            PagingMode::FromOffsetForNumRows => Self::rows(offset, rows, page_size),
        }
    }

    fn pages(start_offset: usize, request_count: usize) -> Self {
        Self {
            start_offset,
            request_count,
            row_target: None,
        }
    }

    fn rows(start_offset: usize, rows: usize, page_size: usize) -> Self {
        Self {
            start_offset,
            request_count: rows.div_ceil(page_size),
            row_target: Some(rows),
        }
    }

    /// Page size for the request at `index`, issued at `offset`
    ///
    /// Row-bounded walks ask for exactly the remaining rows on their last request.
    pub fn page_size_at(&self, index: usize, offset: usize, page_size: usize) -> usize {
        match self.row_target {
            Some(rows) if index + 1 == self.request_count => {
                rows.saturating_sub(offset.saturating_sub(self.start_offset))
            }
            _ => page_size,
        }
    }
}

// ============================================================================
// Trimming
// ============================================================================

/// Reshape the probe response into what the mode would have fetched
///
/// Page-shaped modes return the probe untouched; offset and row modes drop
/// leading rows and cap the count.
pub fn trim(request: &PageRequest, probe: &ApiResponse) -> Result<ApiResponse> {
    let (skip, take) = match request.mode {
        PagingMode::AllPages | PagingMode::ToNumPages => return Ok(probe.clone()),
        PagingMode::ToNumRows => (0, request.num_rows),
        PagingMode::FromOffset | PagingMode::FromOffsetForNumPages => (request.offset, None),
        PagingMode::FromOffsetForNumRows => (request.offset, request.num_rows),
    };

    let rows = probe.records()?;
    let kept: Vec<_> = rows
        .into_iter()
        .skip(skip)
        .take(take.unwrap_or(usize::MAX))
        .collect();
    probe.with_records(&kept)
}
