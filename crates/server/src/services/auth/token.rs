//! Token issuing and verification.
//!
//! Tokens are self-contained HS256-signed strings; validity is computed
//! from the claims, never looked up server-side. The signing key and TTL
//! come from process configuration and are fixed for the process lifetime.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not parse or its signature does not verify.
    #[error("malformed token")]
    Malformed,

    /// The token parsed and verified but its expiry has passed.
    #[error("token expired")]
    Expired,

    /// Signing failed while issuing a token.
    #[error("token signing failed")]
    Signing,
}

/// Claims carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued for.
    pub sub: String,
    /// Unique token id; makes every issued token distinct.
    pub jti: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Stateless signer/verifier for bearer tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret and TTL.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    /// Issue a signed token for the given subject.
    ///
    /// Each call produces a distinct token: the claims carry a fresh
    /// random id alongside the issue and expiry timestamps.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if serialization or signing fails.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).map_err(|_| TokenError::Signing)?;

        let claims = Claims {
            sub: subject.to_owned(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` if the string does not parse or the
    /// signature does not verify, and `TokenError::Expired` once the
    /// current time reaches the expiry timestamp (strictly: a token whose
    /// expiry equals "now" is already expired, so a zero TTL never yields
    /// a usable token).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below with no leeway; the library default
        // tolerates 60 seconds of clock skew.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    ///
    /// Same as [`TokenCodec::verify`].
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.verify(token)?.sub)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn codec(ttl_secs: u64) -> TokenCodec {
        let secret = SecretString::from("k9#mP2$vL8@qR5!xW3^zB7&nJ4*tG6cd");
        TokenCodec::new(&secret, Duration::from_secs(ttl_secs))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec(3600);
        let token = codec.issue("alice").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, claims.iat + 3600);
        assert_eq!(codec.extract_subject(&token).unwrap(), "alice");
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let codec = codec(3600);
        let a = codec.issue("alice").unwrap();
        let b = codec.issue("alice").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_ttl_token_is_expired() {
        let codec = codec(0);
        let token = codec.issue("alice").unwrap();
        assert_eq!(codec.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec(3600);
        assert_eq!(
            codec.verify("not-a-token").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(codec.verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let codec = codec(3600);
        let token = codec.issue("alice").unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(codec.verify(&tampered).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_wrong_key_is_malformed() {
        let codec_a = codec(3600);
        let other_secret = SecretString::from("z1!qA9@wS8#eD7$rF6%tG5^yH4&uJ3*k");
        let codec_b = TokenCodec::new(&other_secret, Duration::from_secs(3600));

        let token = codec_a.issue("alice").unwrap();
        assert_eq!(codec_b.verify(&token).unwrap_err(), TokenError::Malformed);
    }
}
