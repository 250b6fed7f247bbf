//! Credential extraction from the `Authorization` header.
//!
//! Pure parsing with no crypto or network dependency. The prefix matching is
//! deliberately strict: exact case, single space. A parser that accepts header
//! shapes other intermediaries reject opens the door to request smuggling.

use super::errors::{AuthError, AuthResult};

/// Prefix for end-user bearer credentials
pub const BEARER_PREFIX: &str = "Bearer ";

/// Prefix used by the server-to-server webhook caller
pub const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract a bearer token from an `Authorization` header value
///
/// # Arguments
///
/// * `authorization` - Raw header value, `None` if the header was absent
///
/// # Errors
///
/// * `AuthError::MissingAuthHeader` - Header absent or empty
/// * `AuthError::MalformedAuthHeader` - Wrong prefix or empty token
pub fn bearer_token(authorization: Option<&str>) -> AuthResult<&str> {
    token_with_prefix(authorization, BEARER_PREFIX)
}

/// Extract the webhook API key from an `Authorization` header value
pub fn api_key(authorization: Option<&str>) -> AuthResult<&str> {
    token_with_prefix(authorization, API_KEY_PREFIX)
}

fn token_with_prefix<'a>(authorization: Option<&'a str>, prefix: &str) -> AuthResult<&'a str> {
    let header = match authorization {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingAuthHeader),
    };

    let token = header
        .strip_prefix(prefix)
        .ok_or(AuthError::MalformedAuthHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MalformedAuthHeader);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_accepts_well_formed_header() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_trims_surrounding_whitespace() {
        assert_eq!(bearer_token(Some("Bearer   abc  ")).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_missing_header() {
        assert!(matches!(bearer_token(None), Err(AuthError::MissingAuthHeader)));
        assert!(matches!(bearer_token(Some("")), Err(AuthError::MissingAuthHeader)));
    }

    #[test]
    fn test_bearer_rejects_prefix_without_token() {
        assert!(matches!(
            bearer_token(Some("Bearer")),
            Err(AuthError::MalformedAuthHeader)
        ));
        assert!(matches!(
            bearer_token(Some("Bearer    ")),
            Err(AuthError::MalformedAuthHeader)
        ));
    }

    #[test]
    fn test_bearer_prefix_is_case_sensitive() {
        assert!(matches!(
            bearer_token(Some("bearer abc")),
            Err(AuthError::MalformedAuthHeader)
        ));
        assert!(matches!(
            bearer_token(Some("BEARER abc")),
            Err(AuthError::MalformedAuthHeader)
        ));
    }

    #[test]
    fn test_api_key_extraction() {
        assert_eq!(api_key(Some("ApiKey f00d")).unwrap(), "f00d");
        assert!(matches!(api_key(None), Err(AuthError::MissingAuthHeader)));
        assert!(matches!(
            api_key(Some("Bearer f00d")),
            Err(AuthError::MalformedAuthHeader)
        ));
        assert!(matches!(
            api_key(Some("apikey f00d")),
            Err(AuthError::MalformedAuthHeader)
        ));
    }
}
