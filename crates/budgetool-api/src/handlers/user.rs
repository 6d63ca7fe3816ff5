//! User registration and lookup handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{CreateUserRequest, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::RequireUser;
use crate::state::AppState;

/// POST /api/v1/users - register a new user.
///
/// Usernames are folded to lowercase before storage so lookups are
/// case-insensitive. The credential hash is set in a second step after
/// the row exists.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if req.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("password must not be empty".to_string()));
    }

    let username = req.username.to_lowercase();

    let user = state
        .db
        .user_repo()
        .create(&username, &req.email, &req.first_name, &req.last_name)
        .await?;

    let password_hash = state.auth.passwords.hash_password(&req.password)?;
    state
        .db
        .user_repo()
        .set_password_hash(user.id, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/users/:id - fetch a user
pub async fn get_user(
    RequireUser(_user): RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .db
        .user_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))?;

    Ok(Json(UserResponse::from(user)))
}
