//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pronostiek_core::error::CoreError;
use pronostiek_core::types::DbId;
use pronostiek_db::models::session::CreateSession;
use pronostiek_db::models::user::{CreateUser, User, UserResponse};
use pronostiek_db::repositories::{LockoutPolicy, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::RefreshToken;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Five consecutive wrong passwords lock the account for fifteen minutes.
const LOCKOUT: LockoutPolicy = LockoutPolicy {
    max_failed_attempts: 5,
    lock_minutes: 15,
};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. Returns 201 with the new user; 409 if the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let input = RegisterRequest {
        email: normalize_email(&input.email),
        password: input.password,
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: count it; the repository locks at the threshold.
        if let Some(locked_until) =
            UserRepo::record_failed_login(&state.pool, user.id, LOCKOUT).await?
        {
            tracing::warn!(
                user_id = user.id,
                %locked_until,
                "Account locked after repeated failed logins"
            );
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Rotation: the presented token is spent whether or not a new pair follows.
    let user_id = SessionRepo::consume(&state.pool, &RefreshToken::digest(&input.refresh_token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// The identity behind the presented access token.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Emails are compared case-insensitively by storing them lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Issue a token pair for `user` and open the session backing the refresh token.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = jwt
        .issue_access_token(user.id)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash,
            expires_at: Utc::now() + jwt.refresh_token_ttl(),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_token_ttl().num_seconds(),
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
        },
    })
}
