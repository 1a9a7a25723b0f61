use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user resolved for the current request
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

/// Per-request authentication state. Starts as `Anonymous`; only the identity
/// filter moves it to `Authenticated`, and nothing moves it back.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            AuthState::Anonymous => None,
        }
    }
}

/// Identity filter: runs on every request and never rejects.
///
/// A missing, malformed or expired token leaves the request `Anonymous`;
/// the route policy (`require_identity`) decides what that means.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let current = request
        .extensions()
        .get::<AuthState>()
        .cloned()
        .unwrap_or_default();

    let resolved = match current {
        AuthState::Authenticated(_) => current,
        AuthState::Anonymous => authenticate(&state, request.headers()).await,
    };

    request.extensions_mut().insert(resolved);
    next.run(request).await
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> AuthState {
    let Some(token) = extract_bearer_token(headers) else {
        tracing::debug!("No bearer token on request");
        return AuthState::Anonymous;
    };

    let email = match state.tokens.parse(token) {
        Ok(email) => email,
        Err(TokenError::Expired) => {
            tracing::debug!("Token expired");
            return AuthState::Anonymous;
        }
        Err(e) => {
            tracing::debug!("Unable to extract token principal: {}", e);
            return AuthState::Anonymous;
        }
    };

    let user = match state.store.find_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!("Token principal '{}' has no account", email);
            return AuthState::Anonymous;
        }
        Err(e) => {
            tracing::error!("Failed to resolve token principal '{}': {}", email, e);
            return AuthState::Anonymous;
        }
    };

    // Principal must name the stored account exactly
    if user.email != email {
        return AuthState::Anonymous;
    }

    tracing::debug!("Resolved identity {} ({})", user.email, user.id);
    AuthState::Authenticated(Identity {
        user_id: user.id,
        email: user.email,
        roles: user.roles,
    })
}

/// Token after the `Bearer ` prefix, if the header is present and well-formed
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Handler-level access to the resolved identity; rejects with 401 when absent
#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthState>()
            .and_then(AuthState::identity)
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
