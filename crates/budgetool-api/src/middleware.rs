//! Session Middleware for Axum
//!
//! Resolves the session token on every request and, when valid, inserts
//! the [`CurrentUser`] into the request extensions. Requests without a
//! token, or with a stale one, continue anonymously; the extractors
//! decide whether the route requires a login.

use axum::{body::Body, extract::Request, response::Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use budgetool_auth::AuthService;

/// Session middleware layer
#[derive(Clone)]
pub struct SessionLayer {
    auth: Arc<AuthService>,
}

impl SessionLayer {
    /// Create a new session layer
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionMiddleware {
            inner,
            auth: self.auth.clone(),
        }
    }
}

/// Session middleware service
#[derive(Clone)]
pub struct SessionMiddleware<S> {
    inner: S,
    auth: Arc<AuthService>,
}

impl<S> Service<Request> for SessionMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let auth = self.auth.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let token = extract_session_token(req.headers());

            match token {
                Some(token) => match auth.sessions.authenticate(&token).await {
                    Ok(user) => {
                        let (mut parts, body) = req.into_parts();
                        parts.extensions.insert(user);
                        inner.call(Request::from_parts(parts, body)).await
                    }
                    Err(e) => {
                        // A stale or bogus token behaves like no token at all
                        tracing::debug!(error = %e, "Session token did not resolve");
                        inner.call(req).await
                    }
                },
                None => inner.call(req).await,
            }
        })
    }
}

/// Extract session token from headers/cookies
pub fn extract_session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    // Try X-Session-Token header first (API clients)
    if let Some(token) = headers.get("X-Session-Token") {
        return token.to_str().ok().map(String::from);
    }

    // Try cookie (browsers)
    if let Some(cookie_header) = headers.get("Cookie") {
        if let Ok(cookies) = cookie_header.to_str() {
            for cookie in cookies.split(';') {
                let cookie = cookie.trim();
                if let Some(value) = cookie.strip_prefix("session_token=") {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_session_token_from_header() {
        use axum::http::HeaderMap;

        let mut headers = HeaderMap::new();
        headers.insert("X-Session-Token", "test-token-123".parse().unwrap());

        let token = extract_session_token(&headers);
        assert_eq!(token, Some("test-token-123".to_string()));
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        use axum::http::HeaderMap;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            "other=value; session_token=cookie-token; more=stuff"
                .parse()
                .unwrap(),
        );

        let token = extract_session_token(&headers);
        assert_eq!(token, Some("cookie-token".to_string()));
    }

    #[test]
    fn test_extract_session_token_absent() {
        use axum::http::HeaderMap;

        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
    }
}
