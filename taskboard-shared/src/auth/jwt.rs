/// Identity token generation and validation
///
/// This module mints and verifies the signed identity token carried on every
/// authenticated request. Tokens are JWTs signed with HS256 and encode the
/// user's email as the subject plus an expiry timestamp.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: fixed validity window, 24 hours by default
/// - **Validation**: signature, expiration, and issuer checks
/// - **Uniform rejection**: every verification failure (bad signature,
///   malformed token, wrong issuer, expiry) surfaces as the same
///   [`TokenError::Invalid`], so callers cannot distinguish the cause.
///   The underlying reason is logged at debug level only.
///
/// The signing secret is process-wide immutable state, loaded once at startup
/// and passed in by the caller; it is never rotated at runtime.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{self, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new("user@example.com", Duration::hours(24));
/// let token = jwt::issue_token(&claims, "secret-key-at-least-32-bytes-long")?;
///
/// let subject = jwt::verify_token(&token, "secret-key-at-least-32-bytes-long")?;
/// assert_eq!(subject, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into every token
pub const TOKEN_ISSUER: &str = "taskboard";

/// Default validity window for issued tokens, in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create a token
    #[error("Failed to issue token: {0}")]
    Issue(String),

    /// Token rejected: bad signature, malformed structure, wrong issuer,
    /// or expired. Deliberately a single variant.
    #[error("Invalid or expired token")]
    Invalid,
}

/// Claims carried by an identity token
///
/// # Claims
///
/// - `sub`: Subject - the user's email
/// - `iss`: Issuer - always "taskboard"
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user email
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for the given subject email with the given validity window
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    ///
    /// let claims = Claims::new("user@example.com", Duration::hours(24));
    /// assert_eq!(claims.sub, "user@example.com");
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(subject_email: &str, valid_for: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject_email.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + valid_for).timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs the claims into a token string
///
/// # Errors
///
/// Returns `TokenError::Issue` if encoding fails
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| TokenError::Issue(format!("encoding failed: {}", e)))
}

/// Verifies a token and returns its subject email
///
/// Checks the signature, the issuer, and that the current time is before the
/// expiry timestamp.
///
/// # Errors
///
/// Returns `TokenError::Invalid` for every rejection. The caller is not told
/// whether the failure was a bad signature, a malformed token, or expiry.
pub fn verify_token(token: &str, secret: &str) -> Result<String, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        // Reason stays in the logs, never in the response
        tracing::debug!(error = %e, "identity token rejected");
        TokenError::Invalid
    })?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("user@example.com", Duration::hours(24));

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert!(claims.exp > claims.iat);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let claims = Claims::new("alice@example.com", Duration::hours(24));
        let token = issue_token(&claims, SECRET).expect("Should issue token");

        let subject = verify_token(&token, SECRET).expect("Should verify token");
        assert_eq!(subject, "alice@example.com");
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let claims = Claims::new("alice@example.com", Duration::hours(24));
        let token = issue_token(&claims, SECRET).expect("Should issue token");

        let result = verify_token(&token, "completely-different-secret-value");
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_expired_token() {
        // Expired an hour ago
        let claims = Claims::new("alice@example.com", Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = issue_token(&claims, SECRET).expect("Should issue token");
        let result = verify_token(&token, SECRET);

        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_malformed_token() {
        assert!(matches!(
            verify_token("not-a-jwt", SECRET),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            verify_token("", SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let claims = Claims::new("alice@example.com", Duration::hours(24));
        let token = issue_token(&claims, SECRET).expect("Should issue token");

        // Flip one character in the payload segment
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_rejection_is_uniform() {
        let claims = Claims::new("alice@example.com", Duration::seconds(-3600));
        let expired = issue_token(&claims, SECRET).unwrap();

        let expired_err = verify_token(&expired, SECRET).unwrap_err();
        let garbage_err = verify_token("garbage", SECRET).unwrap_err();

        // Both rejection paths render identically to the caller
        assert_eq!(expired_err.to_string(), garbage_err.to_string());
    }
}
