// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ethos-client
//!
//! An async client SDK for the Ethos higher-education integration API.
//!
//! ## Features
//!
//! - **Paging**: six paging modes over any collection, driven by the
//!   server's total count and max page size headers
//! - **Filters**: criteria, named queries, plain key/value filters and QAPI bodies
//! - **Auth**: API key exchange for bearer tokens, cached until expiry
//! - **Versions**: bare version numbers resolved to vendor media types
//! - **Clients**: resource proxy, error log and resource discovery
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ethos_client::{records, ClientConfig, PageRequest, PagingMode, ProxyClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let client = ProxyClient::from_config(&config)?;
//!
//!     // First 250 persons, version 12
//!     let request = PageRequest::builder("persons")
//!         .version("12")
//!         .mode(PagingMode::ToNumRows)
//!         .num_rows(250)
//!         .build();
//!     let pages = client.get_paged(&request).await?;
//!     let persons: Vec<serde_json::Value> = records(&pages)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        ProxyClient        ErrorsClient        DiscoveryClient   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Filter   │   Version   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ API Key  │ Transport │ Probe         │ Criteria  │ Media types │
//! │ Bearer   │ Rate Limit│ Walk          │ Named     │ SemVer      │
//! │ JWT exp  │           │ Trim          │ Key/Value │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// API key authentication
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// URL construction
pub mod url;

/// Representation versions
pub mod version;

/// Filter builders
pub mod filter;

/// Pagination engine
pub mod pagination;

/// Typed API clients
pub mod clients;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use clients::{records, DiscoveryClient, ErrorsClient, ProxyClient};
pub use config::ClientConfig;
pub use http::{ApiResponse, HttpClient, Transport};
pub use pagination::{Filter, PageRequest, PagingMode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
