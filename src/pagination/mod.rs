//! Pagination module
//!
//! Supports: all pages, N pages, from offset, from offset for N pages,
//! N rows, from offset for N rows
//!
//! # Overview
//!
//! A paging call starts with a single probe request against the collection.
//! Its headers give the total row count and, optionally, the largest page
//! size the server accepts. From that the pager either walks the collection
//! with one sequential request per page, or, when the probe already holds
//! everything asked for, trims the probe into the requested shape without
//! another round trip.

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{trim, WalkPlan};
pub use types::{
    decision_target, should_page, Filter, PageRequest, PageRequestBuilder, PagingMode,
    PagingSettings, PreparedPaging,
};
