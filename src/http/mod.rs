//! HTTP module
//!
//! Provides the transport seam used by every client in this crate.
//!
//! # Features
//!
//! - **Transport trait**: GET/POST/PUT/DELETE returning an [`ApiResponse`]
//! - **reqwest client**: bearer-token authentication and default headers
//! - **Rate Limiting**: optional token bucket limiter using governor
//!
//! Failed requests are never retried; a transport error or a non-2xx status
//! is returned to the caller as-is.

mod client;
mod rate_limit;
mod response;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Transport};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use response::ApiResponse;
