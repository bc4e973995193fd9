//! Caller identity for routes that act on the caller's own rosters.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pronostiek_core::error::CoreError;
use pronostiek_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The user behind a valid `Authorization: Bearer <access token>` header.
///
/// Extraction fails with `401` when the header is absent, not a bearer
/// credential, or carries a token that is forged or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
}

/// The token part of a bearer credential. The scheme is matched
/// case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing bearer token".into()))
        })?;

        let user_id = state.config.jwt.verify_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser { user_id })
    }
}
