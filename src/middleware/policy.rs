use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::auth::AuthState;
use crate::error::ApiError;

const AUTH_PREFIX: &str = "/api/auth";

/// Paths reachable without an identity: the auth endpoints, `/` and `/health`.
pub fn is_public_path(path: &str) -> bool {
    match path {
        "/" | "/health" => true,
        _ => path
            .strip_prefix(AUTH_PREFIX)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
    }
}

/// Route policy: everything outside the public paths needs an `Authenticated`
/// request, including paths no route matches.
pub async fn require_identity(request: Request, next: Next) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let authenticated = matches!(
        request.extensions().get::<AuthState>(),
        Some(AuthState::Authenticated(_))
    );

    if !authenticated {
        tracing::debug!("Rejecting unauthenticated request to {}", request.uri().path());
        return ApiError::unauthorized("Authentication required").into_response();
    }

    next.run(request).await
}
