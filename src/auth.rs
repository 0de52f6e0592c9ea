// ABOUTME: Admin credential verification behind a replaceable Authenticator trait
// ABOUTME: Ships a static shared-secret bearer token check with constant-time comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Admin authentication
//!
//! Route guards only ask an [`Authenticator`] whether a credential is acceptable,
//! so the static token can be swapped for a real scheme without touching handlers.

use subtle::ConstantTimeEq;

/// Decides whether a presented admin credential is valid
pub trait Authenticator: Send + Sync {
    /// `credential` is the bearer token from the request, if one was presented
    fn verify(&self, credential: Option<&str>) -> bool;
}

/// Compares the presented token against one configured secret
pub struct StaticTokenAuthenticator {
    token: String,
}

impl StaticTokenAuthenticator {
    /// Create an authenticator accepting exactly `token`
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn verify(&self, credential: Option<&str>) -> bool {
        match credential {
            // An empty secret would otherwise accept an empty bearer token
            Some(presented) if !self.token.is_empty() => {
                bool::from(presented.as_bytes().ct_eq(self.token.as_bytes()))
            }
            _ => false,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_verification() {
        let auth = StaticTokenAuthenticator::new("admin-token");
        assert!(auth.verify(Some("admin-token")));
        assert!(!auth.verify(Some("admin-token2")));
        assert!(!auth.verify(Some("")));
        assert!(!auth.verify(None));
    }

    #[test]
    fn test_empty_secret_accepts_nothing() {
        let auth = StaticTokenAuthenticator::new("");
        assert!(!auth.verify(Some("")));
    }

    #[test]
    fn test_bearer_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
