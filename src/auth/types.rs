//! Token types

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self { token, expires_at }
    }

    /// Build from a raw token, preferring its own `exp` claim
    pub fn from_raw(token: String, fallback_lifetime_seconds: i64) -> Self {
        match jwt_expiry(&token) {
            Some(expires_at) => Self::new(token, expires_at),
            None => Self::expires_in(token, fallback_lifetime_seconds),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        let buffer = chrono::Duration::seconds(30);
        Utc::now() + buffer >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Read the `exp` claim of a JWT without verifying its signature
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp?, 0)
}

#[cfg(test)]
mod type_tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn jwt(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"gateway-secret"),
        )
        .unwrap()
    }

    fn jwt_with_exp(exp: i64) -> String {
        jwt(&json!({ "sub": "app", "aud": "integration", "exp": exp }))
    }

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());

        // inside the 30s buffer
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_jwt_expiry() {
        let exp = Utc::now().timestamp() + 600;
        let expiry = jwt_expiry(&jwt_with_exp(exp)).unwrap();
        assert_eq!(expiry.timestamp(), exp);
    }

    #[test]
    fn test_jwt_expiry_without_exp_claim() {
        assert!(jwt_expiry(&jwt(&json!({ "sub": "app" }))).is_none());
    }

    #[test]
    fn test_jwt_expiry_ignores_algorithm_and_key() {
        let exp = Utc::now().timestamp() + 900;
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "exp": exp }),
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();
        assert_eq!(jwt_expiry(&token).unwrap().timestamp(), exp);
    }

    #[test]
    fn test_jwt_expiry_opaque_token() {
        assert!(jwt_expiry("not-a-jwt").is_none());
        assert!(jwt_expiry("a.!!!.c").is_none());
    }

    #[test]
    fn test_from_raw_prefers_claim() {
        let exp = Utc::now().timestamp() - 5;
        let token = CachedToken::from_raw(jwt_with_exp(exp), 3600);
        assert!(token.is_expired());

        let token = CachedToken::from_raw("opaque".to_string(), 3600);
        assert!(!token.is_expired());
    }
}
