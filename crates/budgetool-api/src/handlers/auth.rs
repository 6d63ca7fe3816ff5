//! Login and logout handlers (JSON surface)

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiResult;
use crate::middleware::extract_session_token;
use crate::state::AppState;

/// Build the session cookie value for a freshly issued token
pub fn session_cookie(token: &str) -> String {
    format!("session_token={}; Path=/; HttpOnly; SameSite=Lax", token)
}

/// Cookie value that clears the session cookie
pub fn clear_session_cookie() -> String {
    "session_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0".to_string()
}

/// POST /api/v1/auth/login - verify credentials and open a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    let (user, token) = state.auth.log_in(&req.username, &req.password).await?;

    let body = LoginResponse {
        user_id: user.id,
        username: user.username,
        session_token: token.clone(),
    };

    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(body),
    )
        .into_response())
}

/// POST /api/v1/auth/logout - close the current session.
///
/// Succeeds even without a valid session, so logout is idempotent.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if let Some(token) = extract_session_token(&headers) {
        state.auth.sessions.log_out(&token).await?;
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie())],
    )
        .into_response())
}
