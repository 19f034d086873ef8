/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, which converts into the uniform
/// error envelope `{status, error, message, timestamp}` used for every
/// failure response.
///
/// # Taxonomy
///
/// - duplicate email → 409 `conflict`
/// - unknown task or user → 404 `not_found`
/// - non-owner mutation → 403 `forbidden`
/// - bad credentials or bad token → 401 `unauthorized`
/// - request validation → 400 `bad_request`
/// - everything else → 500 `internal_error` (detail logged, never exposed)
///
/// All errors are terminal for the request; nothing is retried internally.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::auth::{
    authorization::AuthzError, identity::IdentityError, jwt::TokenError, password::PasswordError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - bad credentials or bad token
    Unauthorized(String),

    /// Forbidden (403) - caller does not own the resource
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate email
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Uniform error envelope returned for every failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Numeric HTTP status code
    pub status: u16,

    /// Short error code (e.g. "conflict", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let message = match self {
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: error_code.to_string(),
            message,
            timestamp: Utc::now(),
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-constraint violation on the email column surfaces as 409: this
/// is the backstop for the register duplicate check racing with a concurrent
/// insert.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert identity resolution errors to API errors
///
/// An invalid token is a 401 rejected before any handler runs; a verified
/// token whose subject no longer exists is a 404.
impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken(e) => ApiError::Unauthorized(e.to_string()),
            IdentityError::UnknownSubject => ApiError::NotFound("User not found".to_string()),
            IdentityError::Database(e) => ApiError::InternalError(format!("Database error: {}", e)),
        }
    }
}

/// Convert authorization errors to API errors
impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotOwner => {
                ApiError::Forbidden("Not authorized to access this task".to_string())
            }
        }
    }
}

/// Convert token errors to API errors
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => ApiError::Unauthorized(err.to_string()),
            TokenError::Issue(msg) => ApiError::InternalError(format!("Token issue failed: {}", msg)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert request validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |error| {
                    let detail = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid value".to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        ApiError::BadRequest(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Conflict(String::new()).status_and_code().0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Forbidden(String::new()).status_and_code().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Unauthorized(String::new()).status_and_code().0,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_authz_error_is_forbidden() {
        let err: ApiError = AuthzError::NotOwner.into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let err: ApiError = TokenError::Invalid.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_unknown_subject_is_not_found() {
        let err: ApiError = IdentityError::UnknownSubject.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_envelope_shape() {
        let response = ApiError::Conflict("Email already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
