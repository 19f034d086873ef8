/// Ownership checks for task mutation
///
/// Taskboard has a single authorization rule: a task may only be mutated or
/// deleted by its owner. The check is plain value equality between the acting
/// identity's email and the resource owner's email; there is no role
/// hierarchy.
///
/// The guard runs before every task update and delete. It is never applied to
/// create or list: listing is scoped to the acting user by query, not by
/// post-hoc filtering.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::require_owner;
///
/// assert!(require_owner("alice@example.com", "alice@example.com").is_ok());
/// assert!(require_owner("bob@example.com", "alice@example.com").is_err());
/// ```

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Acting identity does not own the resource
    #[error("Not authorized to access this task")]
    NotOwner,
}

/// Checks that the acting identity owns the resource
///
/// # Arguments
///
/// * `acting_email` - Email of the authenticated caller
/// * `owner_email` - Email of the resource owner
///
/// # Errors
///
/// Returns `AuthzError::NotOwner` when the two do not match
pub fn require_owner(acting_email: &str, owner_email: &str) -> Result<(), AuthzError> {
    if acting_email != owner_email {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_passes() {
        assert!(require_owner("a@x.com", "a@x.com").is_ok());
    }

    #[test]
    fn test_non_owner_fails() {
        let result = require_owner("b@x.com", "a@x.com");
        assert!(matches!(result, Err(AuthzError::NotOwner)));
    }

    #[test]
    fn test_email_comparison_is_case_sensitive() {
        // Emails are stored case-sensitive, so the guard compares them as-is
        assert!(require_owner("A@x.com", "a@x.com").is_err());
    }
}
