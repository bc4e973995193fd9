//! Repository for the `users` table.

use pronostiek_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, email, password_hash, is_active, last_login_at, \
                       failed_login_count, locked_until, created_at, updated_at";

/// Lockout policy applied by [`UserRepo::record_failed_login`].
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Consecutive failures that trigger a lock.
    pub max_failed_attempts: i32,
    pub lock_minutes: i32,
}

pub struct UserRepo;

impl UserRepo {
    /// Register an account. A taken email violates `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Emails are stored lowercased, so callers normalise before looking up.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count a failed password attempt and lock the account once the count
    /// reaches the policy threshold.
    ///
    /// Counting and locking happen in a single `UPDATE`, so concurrent
    /// failures cannot slip past the threshold. Returns the lock expiry when
    /// this attempt locked the account.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        policy: LockoutPolicy,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET
                failed_login_count = failed_login_count + 1,
                locked_until = CASE
                    WHEN failed_login_count + 1 >= $2
                        THEN NOW() + make_interval(mins => $3)
                    ELSE locked_until
                END
             WHERE id = $1
             RETURNING CASE WHEN failed_login_count >= $2 THEN locked_until END",
        )
        .bind(id)
        .bind(policy.max_failed_attempts)
        .bind(policy.lock_minutes)
        .fetch_one(pool)
        .await
    }

    /// Reset the failure counter, clear any lock and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
