//! Refresh-token sessions.

use pronostiek_core::types::{DbId, Timestamp};

/// A session to open on login or on token rotation.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    /// SHA-256 hex digest of the refresh token handed to the client.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
