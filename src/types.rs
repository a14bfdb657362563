//! Common types used throughout the Ethos client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read
    #[default]
    GET,
    /// Create, or run a QAPI query
    POST,
    /// Update
    PUT,
    /// Delete
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Region
// ============================================================================

/// Hosting region of the integration tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// United States
    #[default]
    Us,
    /// Canada
    Canada,
    /// Europe (Ireland)
    Europe,
    /// Australia
    Australia,
}

impl Region {
    /// Base URL of the regional API gateway
    pub fn base_url(self) -> &'static str {
        match self {
            Region::Us => "https://integrate.elluciancloud.com",
            Region::Canada => "https://integrate.elluciancloud.ca",
            Region::Europe => "https://integrate.elluciancloud.ie",
            Region::Australia => "https://integrate.elluciancloud.com.au",
        }
    }
}

impl FromStr for Region {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "ca" | "canada" => Ok(Region::Canada),
            "eu" | "europe" => Ok(Region::Europe),
            "au" | "australia" => Ok(Region::Australia),
            other => Err(crate::Error::config(format!("unknown region '{other}'"))),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle blank strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or whitespace
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_blank(self) -> Option<String> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let delete: reqwest::Method = Method::DELETE.into();
        assert_eq!(reqwest::Method::DELETE, delete);
        assert_eq!(Method::PUT.to_string(), "PUT");
    }

    #[test]
    fn test_region_serde() {
        let region: Region = serde_json::from_str("\"europe\"").unwrap();
        assert_eq!(region, Region::Europe);

        let json = serde_json::to_string(&Region::Australia).unwrap();
        assert_eq!(json, "\"australia\"");
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("CA".parse::<Region>().unwrap(), Region::Canada);
        assert_eq!(" us ".parse::<Region>().unwrap(), Region::Us);
        assert!("mars".parse::<Region>().is_err());
        assert!(Region::Europe.base_url().ends_with(".ie"));
    }

    #[test]
    fn test_none_if_blank() {
        assert_eq!(
            Some("v12".to_string()).none_if_blank(),
            Some("v12".to_string())
        );
        assert_eq!(Some("  ".to_string()).none_if_blank(), None);
        assert_eq!(None::<String>.none_if_blank(), None);
        assert_eq!(String::new().none_if_blank(), None);
    }
}
