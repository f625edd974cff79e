//! SDK credential configuration.
//!
//! Credentials are injected by the host application and passed through to
//! the SDK's setup and authorize calls. They are opaque to the bridge and
//! must never be embedded as compile-time literals.

use secrecy::{ExposeSecret, SecretString};

/// Credentials for the scanning SDK.
///
/// The token is held as a [`SecretString`] so it is redacted from `Debug`
/// output and never serialized by accident.
///
/// # Examples
///
/// ```rust
/// use multiscan_bridge::core::SdkCredentials;
///
/// let credentials = SdkCredentials::new("tok_live_...", "user-42", "per-user-salt")
///     .with_claim("scan:body")
///     .with_claim("scan:face");
///
/// assert_eq!(credentials.user_id(), "user-42");
/// assert_eq!(credentials.claims().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SdkCredentials {
    token: SecretString,
    user_id: String,
    salt: String,
    claims: Vec<String>,
}

impl SdkCredentials {
    /// Creates credentials with an empty claims list.
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            token: SecretString::new(token.into()),
            user_id: user_id.into(),
            salt: salt.into(),
            claims: Vec::new(),
        }
    }

    /// Adds a claim.
    pub fn with_claim(mut self, claim: impl Into<String>) -> Self {
        self.claims.push(claim.into());
        self
    }

    /// Replaces the claims list.
    pub fn with_claims(mut self, claims: Vec<String>) -> Self {
        self.claims = claims;
        self
    }

    /// Returns the SDK token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns `true` if the token is non-empty.
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().is_empty()
    }

    /// Returns the user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the per-user salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Returns the claims list.
    pub fn claims(&self) -> &[String] {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_builder() {
        let credentials = SdkCredentials::new("token-abc", "user-1", "salt-1")
            .with_claim("scan:finger");

        assert_eq!(credentials.user_id(), "user-1");
        assert_eq!(credentials.salt(), "salt-1");
        assert_eq!(credentials.claims(), &["scan:finger".to_string()]);
        assert!(credentials.has_token());
    }

    #[test]
    fn test_empty_token_detected() {
        let credentials = SdkCredentials::new("", "user-1", "salt-1");
        assert!(!credentials.has_token());
    }

    #[test]
    fn test_debug_redacts_token() {
        let credentials = SdkCredentials::new("tok_super_secret", "user-1", "salt-1");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("tok_super_secret"));
        assert!(rendered.contains("user-1"));
    }
}
