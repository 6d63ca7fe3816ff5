//! Login DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    /// Plain session token; also set as the session cookie
    pub session_token: String,
}
