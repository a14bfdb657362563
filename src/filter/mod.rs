//! Filter builders
//!
//! Supports: criteria filters, named queries, simple filter maps
//!
//! # Overview
//!
//! Each builder renders to the string form the server expects and converts
//! into a [`Filter`](crate::pagination::Filter) for use in a
//! [`PageRequest`](crate::pagination::PageRequest). Once rendered, the pager
//! treats a filter as opaque.

mod builders;

pub use builders::{CriteriaFilter, FilterMap, NamedQuery};
