//! HTTP Basic authentication for the documentation gate.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use subtle::ConstantTimeEq;

use crate::errors::ApiError;

/// Verify the Basic credentials carried by a request against the configured
/// operator account. Both the username and the password comparisons run in
/// constant time, and both always run.
pub fn check_basic(headers: &HeaderMap, expected_user: &str, expected_pass: &str) -> Result<(), ApiError> {
    let (user, pass) = parse_basic(headers)
        .ok_or_else(|| ApiError::Unauthorized("Identifiants requis".to_string()))?;

    let user_ok = constant_time_compare(&user, expected_user);
    let pass_ok = constant_time_compare(&pass, expected_pass);

    if user_ok & pass_ok {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Identifiants invalides".to_string()))
    }
}

/// Extract the `user:password` pair from an `Authorization: Basic` header.
fn parse_basic(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;

    Some((user.to_string(), pass.to_string()))
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_basic(user: &str, pass: &str) -> HeaderMap {
        let token = BASE64.encode(format!("{user}:{pass}"));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("operateur", "operateur"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("operateur", "operateur2"));
        assert!(!constant_time_compare("court", "beaucoup-plus-long"));
    }

    #[test]
    fn test_check_basic_accepts_exact_match() {
        let headers = headers_with_basic("admin", "secret");
        assert!(check_basic(&headers, "admin", "secret").is_ok());
    }

    #[test]
    fn test_check_basic_rejects_wrong_password() {
        let headers = headers_with_basic("admin", "devine");
        assert!(check_basic(&headers, "admin", "secret").is_err());
    }

    #[test]
    fn test_check_basic_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(check_basic(&headers, "admin", "secret").is_err());
    }

    #[test]
    fn test_check_basic_rejects_malformed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic pas-du-base64!"),
        );
        assert!(check_basic(&headers, "admin", "secret").is_err());
    }
}
