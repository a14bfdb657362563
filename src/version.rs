//! Representation versions
//!
//! Resource versions are negotiated through the `Accept` header using vendor
//! media types such as `application/vnd.hedtech.integration.v12.1.0+json`.
//! Callers may pass a full media type, a bare version (`12`, `v12.1`,
//! `12.1.0`), or nothing at all.

use crate::error::{Error, Result};
use crate::http::ApiResponse;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// Media type prefix for resource representations
pub const MEDIA_TYPE_PREFIX: &str = "application/vnd.hedtech.integration.v";

/// Media type suffix for JSON representations
pub const MEDIA_TYPE_SUFFIX: &str = "+json";

/// Header the server uses to report the representation it returned
pub const HDR_MEDIA_TYPE: &str = "x-media-type";

static MEDIA_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.v(\d+)(?:\.(\d+))?(?:\.(\d+))?\+json").expect("media type regex is valid")
});

static BARE_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?(\d+(?:\.\d+){0,2})$").expect("version regex is valid"));

/// Resolve the `Accept` header for a caller-supplied version
///
/// Blank versions resolve to `default`; media types pass through unchanged.
pub fn accept_header(version: &str, default: &str) -> Result<String> {
    let version = version.trim();
    if version.is_empty() {
        return Ok(default.to_string());
    }
    if version.contains('/') {
        return Ok(version.to_string());
    }
    match BARE_VERSION_REGEX.captures(version) {
        Some(caps) => Ok(format!("{MEDIA_TYPE_PREFIX}{}{MEDIA_TYPE_SUFFIX}", &caps[1])),
        None => Err(Error::invalid_argument(
            "version",
            format!("'{version}' is neither a media type nor a version number"),
        )),
    }
}

/// Parse a bare version, padding a missing minor or patch with zero
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    let padded = match trimmed.matches('.').count() {
        0 => format!("{trimmed}.0.0"),
        1 => format!("{trimmed}.0"),
        _ => trimmed.to_string(),
    };
    Ok(Version::parse(&padded)?)
}

/// Extract the version from a vendor media type
pub fn parse_media_type_version(media_type: &str) -> Option<Version> {
    let caps = MEDIA_VERSION_REGEX.captures(media_type)?;
    let part = |i: usize| {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Version of the representation a response carries, if it says
pub fn version_from_response(response: &ApiResponse) -> Option<Version> {
    response
        .header(HDR_MEDIA_TYPE)
        .and_then(parse_media_type_version)
        .or_else(|| {
            response
                .header("content-type")
                .and_then(parse_media_type_version)
        })
}

/// Media type for a full version
pub fn media_type_for(version: &Version) -> String {
    format!("{MEDIA_TYPE_PREFIX}{version}{MEDIA_TYPE_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "application/json" ; "blank uses default")]
    #[test_case("   ", "application/json" ; "whitespace uses default")]
    #[test_case("12", "application/vnd.hedtech.integration.v12+json" ; "major only")]
    #[test_case("v12.1", "application/vnd.hedtech.integration.v12.1+json" ; "prefixed minor")]
    #[test_case("12.1.0", "application/vnd.hedtech.integration.v12.1.0+json" ; "full version")]
    #[test_case(
        "application/vnd.hedtech.integration.v6+json",
        "application/vnd.hedtech.integration.v6+json" ;
        "media type passes through"
    )]
    fn test_accept_header(version: &str, expected: &str) {
        assert_eq!(accept_header(version, "application/json").unwrap(), expected);
    }

    #[test]
    fn test_accept_header_rejects_garbage() {
        let err = accept_header("latest-ish", "application/json").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_parse_version_pads() {
        assert_eq!(parse_version("12").unwrap(), Version::new(12, 0, 0));
        assert_eq!(parse_version("v8.2").unwrap(), Version::new(8, 2, 0));
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parse_version("x.y").is_err());
    }

    #[test]
    fn test_parse_media_type_version() {
        assert_eq!(
            parse_media_type_version("application/vnd.hedtech.integration.v12.1.0+json"),
            Some(Version::new(12, 1, 0))
        );
        assert_eq!(
            parse_media_type_version("application/vnd.hedtech.integration.v6+json"),
            Some(Version::new(6, 0, 0))
        );
        assert_eq!(parse_media_type_version("application/json"), None);
    }

    #[test]
    fn test_version_from_response() {
        let response = ApiResponse::new(200, "[]")
            .with_header("x-media-type", "application/vnd.hedtech.integration.v11.2.0+json");
        assert_eq!(
            version_from_response(&response),
            Some(Version::new(11, 2, 0))
        );

        let response = ApiResponse::new(200, "[]")
            .with_header("content-type", "application/vnd.hedtech.integration.v7+json");
        assert_eq!(version_from_response(&response), Some(Version::new(7, 0, 0)));

        assert_eq!(version_from_response(&ApiResponse::new(200, "[]")), None);
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(
            media_type_for(&Version::new(12, 1, 0)),
            "application/vnd.hedtech.integration.v12.1.0+json"
        );
    }
}
