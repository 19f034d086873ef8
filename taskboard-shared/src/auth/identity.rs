/// Request identity resolution
///
/// Given the bearer token extracted from an inbound request, this module
/// verifies the token and resolves the corresponding user record. The API
/// layer runs this in middleware, so a request with a missing, invalid, or
/// orphaned token is rejected before any task logic executes (fails closed).
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::identity::resolve_identity;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, token: &str) -> Result<(), Box<dyn std::error::Error>> {
/// let current_user = resolve_identity(&pool, token, "jwt-secret").await?;
/// println!("Acting as {}", current_user.email);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::{self, TokenError};
use crate::models::user::User;

/// The acting user resolved from an identity token
///
/// Added to request extensions by the API's auth layer; handlers extract it
/// with Axum's `Extension` extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID
    pub id: Uuid,

    /// Email address (the token subject)
    pub email: String,

    /// Display name
    pub name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Error type for identity resolution
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Token verification failed (bad signature, malformed, or expired)
    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    /// Token verified but its subject no longer exists in the store
    #[error("User not found")]
    UnknownSubject,

    /// Database error during user lookup
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolves a bearer token to the acting user
///
/// Verifies the token signature and expiry, then loads the user record for
/// the token's subject email.
///
/// # Errors
///
/// - [`IdentityError::InvalidToken`] if the token fails verification
/// - [`IdentityError::UnknownSubject`] if the subject email has no user
///   record (e.g. a token outliving its account)
/// - [`IdentityError::Database`] if the lookup fails
pub async fn resolve_identity(
    pool: &PgPool,
    token: &str,
    secret: &str,
) -> Result<CurrentUser, IdentityError> {
    let subject = jwt::verify_token(token, secret)?;

    let user = User::find_by_email(pool, &subject)
        .await?
        .ok_or(IdentityError::UnknownSubject)?;

    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: chrono::Utc::now(),
        };

        let current: CurrentUser = user.clone().into();
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, "alice@example.com");
        assert_eq!(current.name, "Alice");
    }

    #[test]
    fn test_invalid_token_maps_to_identity_error() {
        let err: IdentityError = TokenError::Invalid.into();
        assert!(matches!(err, IdentityError::InvalidToken(_)));
    }
}
