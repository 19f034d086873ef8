/// Authentication endpoints
///
/// This module is the authentication service: it orchestrates registration
/// (uniqueness check → hash → persist → issue token) and login (verify
/// credentials → issue token). Each call is independent; there is no shared
/// mutable state between requests.
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Login and get an identity token
///
/// # Error behavior
///
/// Login deliberately distinguishes "unknown email" (404) from "wrong
/// password" (401), matching the system this one reproduces. To keep the two
/// paths indistinguishable by timing, the unknown-email path still performs
/// one Argon2 verification against a fixed dummy hash.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Response for both register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed identity token
    pub token: String,

    /// The user's display name
    pub username: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "correct-horse-battery"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Courtesy duplicate check; the unique constraint on users.email is the
    // authoritative backstop if a concurrent register wins the race.
    if User::email_exists(&state.db, &req.email).await? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let claims = jwt::Claims::new(&user.email, state.token_ttl());
    let token = jwt::issue_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        username: user.name,
    }))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "correct-horse-battery"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: wrong password
/// - `404 Not Found`: no user with that email
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = match User::find_by_email(&state.db, &req.email).await? {
        Some(user) => user,
        None => {
            // Pay the same Argon2 cost as the known-email path so the two
            // cannot be told apart by timing
            let _ = password::verify_password(&req.password, password::dummy_hash());
            return Err(ApiError::NotFound("User not found".to_string()));
        }
    };

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = jwt::Claims::new(&user.email, state.token_ttl());
    let token = jwt::issue_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        username: user.name,
    }))
}
