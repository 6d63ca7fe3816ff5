//! Budgetool Authentication Layer
//!
//! Credential and session handling for the budgetool application:
//! - Argon2id password hashing with optional pepper
//! - Database-backed login sessions with hashed tokens
//!
//! The HTTP layer talks to [`AuthService`], which bundles the password
//! and session services over one database handle.

pub mod config;
pub mod error;
pub mod password;
pub mod session;

use std::sync::Arc;

use budgetool_db::Database;

pub use config::{AuthConfig, PasswordConfig, SessionConfig};
pub use error::{AuthError, AuthResult};
pub use password::PasswordService;
pub use session::{CurrentUser, SessionService};

/// Bundle of authentication services
#[derive(Clone)]
pub struct AuthService {
    /// Password hashing and verification
    pub passwords: PasswordService,
    /// Login session management
    pub sessions: SessionService,
}

impl AuthService {
    /// Create the authentication services from one config
    pub fn new(db: Arc<Database>, config: AuthConfig) -> Self {
        Self {
            passwords: PasswordService::new(config.password),
            sessions: SessionService::new(db, config.session),
        }
    }

    /// Verify credentials and open a session
    pub async fn log_in(&self, username: &str, password: &str) -> AuthResult<(CurrentUser, String)> {
        self.sessions.log_in(username, password, &self.passwords).await
    }
}
