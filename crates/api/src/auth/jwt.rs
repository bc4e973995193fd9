//! Access and refresh tokens.
//!
//! An access token is a short-lived HS256 JWT whose only identity claim is the
//! user id; every `/teams` route resolves the caller from it. A refresh token
//! is an opaque random string handed to the client once. Only its SHA-256
//! digest is stored, and presenting it consumes the session.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pronostiek_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: DbId,
    exp: i64,
    iat: i64,
    jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    /// Sign an access token for `user_id`, valid for [`Self::access_token_ttl`].
    pub fn issue_access_token(&self, user_id: DbId) -> Result<String, jsonwebtoken::errors::Error> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (issued_at + self.access_token_ttl()).timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry, returning the user id the token was issued to.
    pub fn verify_access_token(&self, token: &str) -> Result<DbId, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims.sub)
    }
}

/// A freshly minted refresh token and the digest the session row keeps.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = Uuid::new_v4().simple().to_string();
        let hash = Self::digest(&plaintext);
        Self { plaintext, hash }
    }

    /// Hex SHA-256 of a presented token, as stored in `sessions.refresh_token_hash`.
    pub fn digest(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "kasseien-en-hellingen".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_resolves_to_user() {
        let config = config();
        let token = config.issue_access_token(42).unwrap();
        assert_eq!(config.verify_access_token(&token).unwrap(), 42);
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let config = config();
        // Past the default 60 second leeway.
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: 7,
            exp: now - 300,
            iat: now - 1_200,
            jti: "stale".to_string(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(config.verify_access_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtConfig {
            secret: "andere-sleutel".to_string(),
            ..config()
        };
        let token = other.issue_access_token(1).unwrap();
        assert!(config().verify_access_token(&token).is_err());
    }

    #[test]
    fn refresh_token_digest_matches_presented_token() {
        let token = RefreshToken::generate();
        assert_eq!(token.hash, RefreshToken::digest(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_ne!(token.plaintext, RefreshToken::generate().plaintext);
    }

    #[test]
    fn lifetimes_follow_config() {
        assert_eq!(config().access_token_ttl().num_seconds(), 900);
        assert_eq!(config().refresh_token_ttl().num_days(), 7);
    }
}
