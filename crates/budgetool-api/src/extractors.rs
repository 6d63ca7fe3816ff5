//! Custom Axum Extractors
//!
//! Login gating for the two halves of the HTTP surface: JSON routes
//! reject anonymous requests with 401, page routes redirect to /login.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::error::{ApiError, ErrorResponse};
use budgetool_auth::CurrentUser;

// =============================================================================
// Required User (JSON routes)
// =============================================================================

/// Extractor for a required login on JSON routes.
///
/// Rejects with a 401 JSON body when the session middleware did not
/// attach a user.
pub struct RequireUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| error_response(ApiError::Unauthorized))
    }
}

// =============================================================================
// Required User (page routes)
// =============================================================================

/// Extractor for a required login on server-rendered pages.
///
/// Anonymous requests are redirected to the login page instead of
/// receiving a JSON error.
pub struct RequireUserPage(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUserPage
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(RequireUserPage)
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}

// =============================================================================
// Optional User
// =============================================================================

/// Optional login (doesn't fail if not authenticated)
pub struct OptionalUser(pub Option<CurrentUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

/// Create error response from ApiError
pub fn error_response(error: ApiError) -> Response {
    let status = error.status_code();
    let response = ErrorResponse::from(&error);

    (status, Json(response)).into_response()
}
