//! Authentication error types

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Password hashing failed")]
    PasswordHashingFailed,

    #[error("Password verification failed")]
    PasswordVerificationFailed,

    #[error("Database error: {0}")]
    Db(#[from] budgetool_db::DbError),

    #[error("Internal auth error: {0}")]
    Internal(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
