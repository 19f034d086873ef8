/// Authentication and authorization utilities
///
/// This module provides the security primitives for Taskboard:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Identity token generation and validation
/// - [`identity`]: Resolving a bearer token to the acting user
/// - [`authorization`]: Ownership checks for task mutation
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Identity Tokens**: HS256-signed JWTs with a fixed validity window
/// - **Uniform Rejection**: all token verification failures look the same
///   to callers, so a client cannot distinguish a bad signature from an
///   expired token
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{self, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new("user@example.com", chrono::Duration::hours(24));
/// let token = jwt::issue_token(&claims, "secret-key")?;
/// assert_eq!(jwt::verify_token(&token, "secret-key")?, "user@example.com");
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod identity;
pub mod jwt;
pub mod password;
