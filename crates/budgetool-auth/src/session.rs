//! Session Management Service
//!
//! Cookie-backed login sessions with:
//! - Cryptographically secure token generation
//! - SHA-256 hashed token storage (plain tokens are never persisted)
//! - Absolute expiry and expired-session purging

use chrono::{Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{AuthError, AuthResult};
use budgetool_db::Database;

/// The authenticated principal attached to a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Session service for logging users in and out and resolving tokens
#[derive(Clone)]
pub struct SessionService {
    db: Arc<Database>,
    config: SessionConfig,
}

impl SessionService {
    /// Create a new session service
    pub fn new(db: Arc<Database>, config: SessionConfig) -> Self {
        Self { db, config }
    }

    /// Verify credentials and open a session.
    ///
    /// Usernames are stored lowercase, so the lookup folds case first.
    /// Returns the authenticated user and the plain session token; only
    /// the token's hash is persisted.
    pub async fn log_in(
        &self,
        username: &str,
        password: &str,
        passwords: &crate::password::PasswordService,
    ) -> AuthResult<(CurrentUser, String)> {
        let username = username.to_lowercase();

        let user = self
            .db
            .user_repo()
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !passwords.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token(self.config.token_length);
        let token_hash = hash_token(&token);

        let expires_at = Utc::now()
            + Duration::from_std(self.config.lifetime)
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.db
            .user_repo()
            .create_session(user.id, &token_hash, expires_at)
            .await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok((
            CurrentUser {
                id: user.id,
                username: user.username,
            },
            token,
        ))
    }

    /// Resolve a session token to its user.
    ///
    /// Only unexpired sessions resolve; expired rows are left for the
    /// periodic purge.
    pub async fn authenticate(&self, token: &str) -> AuthResult<CurrentUser> {
        let token_hash = hash_token(token);

        let session = self
            .db
            .user_repo()
            .find_session_by_token(&token_hash)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        let user = self
            .db
            .user_repo()
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }

    /// Close the session behind a token (logout)
    pub async fn log_out(&self, token: &str) -> AuthResult<()> {
        let token_hash = hash_token(token);
        self.db.user_repo().delete_session(&token_hash).await?;
        Ok(())
    }

    /// Delete expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> AuthResult<u64> {
        let removed = self.db.user_repo().delete_expired_sessions().await?;
        if removed > 0 {
            tracing::info!(removed, "Purged expired sessions");
        }
        Ok(removed)
    }
}

// =============================================================================
// Token helpers
// =============================================================================

/// Generate a cryptographically secure session token
fn generate_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, &bytes)
}

/// Hash a token for storage (never store plain tokens)
fn hash_token(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    hex::encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let token = generate_token(32);

        // 32 bytes base64url without padding is 43 chars
        assert_eq!(token.len(), 43);
        assert!(!token.contains('='));

        // Tokens are random
        assert_ne!(token, generate_token(32));
    }

    #[test]
    fn test_token_hashing() {
        let token = generate_token(32);
        let hash = hash_token(&token);

        // Hash should be 64 hex chars (SHA-256)
        assert_eq!(hash.len(), 64);

        // Same token should produce same hash
        assert_eq!(hash, hash_token(&token));

        // The hash never contains the token itself
        assert_ne!(hash, token);
    }
}
