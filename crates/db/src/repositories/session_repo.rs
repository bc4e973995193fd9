//! Repository for the `sessions` table.
//!
//! A session lives until it expires or its refresh token is presented once.

use pronostiek_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::CreateSession;

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session, returning its id.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .fetch_one(pool)
        .await
    }

    /// Revoke the live session holding `refresh_token_hash` and return its user.
    ///
    /// The revoke and the liveness check are one statement, so a token that
    /// is presented twice concurrently yields a user only once. `None` for
    /// unknown, expired or already used tokens.
    pub async fn consume(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(refresh_token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke every live session of a user. Returns the number revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
