//! API error handling
//!
//! One error enum for the JSON surface; each variant maps to an HTTP
//! status and a machine-readable response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Authentication
    // =========================================================================
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // =========================================================================
    // Request
    // =========================================================================
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Username already taken")]
    UsernameTaken,

    // =========================================================================
    // Internal
    // =========================================================================
    #[error("Database error")]
    DatabaseError,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::DatabaseError | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub code: u16,
    /// Human-readable error message
    pub msg: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            msg: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse::from(&self);

        (status, Json(error_response)).into_response()
    }
}

impl From<budgetool_db::DbError> for ApiError {
    fn from(err: budgetool_db::DbError) -> Self {
        match err {
            budgetool_db::DbError::Duplicate(_) => Self::UsernameTaken,
            other => {
                tracing::error!(error = ?other, "Database error");
                Self::DatabaseError
            }
        }
    }
}

impl From<budgetool_auth::AuthError> for ApiError {
    fn from(err: budgetool_auth::AuthError) -> Self {
        use budgetool_auth::AuthError;
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::SessionNotFound => Self::Unauthorized,
            AuthError::Db(db) => Self::from(db),
            other => {
                tracing::error!(error = ?other, "Auth error");
                Self::Internal("authentication failure".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("budget".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::UsernameTaken.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(&ApiError::InvalidCredentials);
        assert_eq!(body.code, 401);
        assert_eq!(body.msg, "Invalid credentials");
    }

    #[test]
    fn test_layer_error_conversions() {
        let err = ApiError::from(budgetool_db::DbError::Duplicate("alice".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(budgetool_auth::AuthError::SessionNotFound);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError::from(budgetool_auth::AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
