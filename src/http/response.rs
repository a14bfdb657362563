//! Response wrapper
//!
//! Every request made through a [`Transport`](super::Transport) yields an
//! `ApiResponse`: status, headers and the fully read body text. Holding the
//! body as a string lets the pager keep the probe response around and trim it
//! later without another round trip.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// A fully buffered HTTP response
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (case-insensitive)
    pub headers: HeaderMap,
    /// Body text
    pub content: String,
    /// URL the request was sent to
    pub url: String,
}

impl ApiResponse {
    /// Create a response with a status and body
    pub fn new(status: u16, content: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content: content.into(),
            url: String::new(),
        }
    }

    /// Add a header; invalid names or values are ignored
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_str(name),
            HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the request URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Buffer a reqwest response
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let content = response.text().await?;
        Ok(Self {
            status,
            headers,
            content,
            url,
        })
    }

    /// Look up a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Look up and parse a header; unparseable values read as absent
    pub fn header_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.header(name).and_then(|v| v.trim().parse().ok())
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.content)?)
    }

    /// Read the body as a JSON array of rows
    ///
    /// A blank body is an empty collection. Anything else that is not a JSON
    /// array is a [`Error::MalformedBody`].
    pub fn records(&self) -> Result<Vec<JsonValue>> {
        if self.content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<JsonValue>(&self.content) {
            Ok(JsonValue::Array(rows)) => Ok(rows),
            Ok(other) => Err(Error::malformed_body(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(Error::malformed_body(format!("invalid JSON: {e}"))),
        }
    }

    /// Copy of this response with its body replaced by `rows`
    pub fn with_records(&self, rows: &[JsonValue]) -> Result<Self> {
        Ok(Self {
            status: self.status,
            headers: self.headers.clone(),
            content: serde_json::to_string(rows)?,
            url: self.url.clone(),
        })
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = ApiResponse::new(200, "[]").with_header("X-Total-Count", "42");
        assert_eq!(response.header("x-total-count"), Some("42"));
        assert_eq!(response.header_as::<usize>("X-TOTAL-COUNT"), Some(42));
        assert_eq!(response.header("x-max-page-size"), None);
    }

    #[test]
    fn test_header_as_lenient() {
        let response = ApiResponse::new(200, "[]").with_header("x-total-count", "lots");
        assert_eq!(response.header_as::<usize>("x-total-count"), None);
    }

    #[test]
    fn test_records() {
        let response = ApiResponse::new(200, r#"[{"id":"a"},{"id":"b"}]"#);
        let rows = response.records().unwrap();
        assert_eq!(rows, vec![json!({"id": "a"}), json!({"id": "b"})]);

        assert!(ApiResponse::new(200, "  ").records().unwrap().is_empty());
    }

    #[test]
    fn test_records_rejects_non_array() {
        let err = ApiResponse::new(200, r#"{"id":"a"}"#).records().unwrap_err();
        assert!(err.to_string().contains("an object"));

        let err = ApiResponse::new(200, "<html>").records().unwrap_err();
        assert!(matches!(err, Error::MalformedBody { .. }));
    }

    #[test]
    fn test_with_records_keeps_metadata() {
        let response = ApiResponse::new(200, "[1,2,3]")
            .with_header("x-total-count", "3")
            .with_url("https://host/api/things");
        let trimmed = response.with_records(&[json!(2)]).unwrap();
        assert_eq!(trimmed.content, "[2]");
        assert_eq!(trimmed.header("x-total-count"), Some("3"));
        assert_eq!(trimmed.url, "https://host/api/things");
    }
}
