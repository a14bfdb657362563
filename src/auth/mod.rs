//! Authentication module
//!
//! Exchanges an application API key for a short-lived bearer token and keeps
//! the token cached until shortly before it expires.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{jwt_expiry, CachedToken};

#[cfg(test)]
mod tests;
