// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, Json};

use crate::api::{ApiJson, LoginRequest, TokenResponse};
use crate::auth::verify_password;
use crate::error::ApiError;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// POST /api/auth/login - Exchange email + password for a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown email and wrong password produce the same 401 and message.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.check()?;

    let user = match state.store.find_user_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            tracing::info!("Login rejected: unknown email");
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
    };

    if !verify_password(&payload.password, &user.password_hash).await? {
        tracing::info!("Login rejected: bad password for user {}", user.id);
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = state.tokens.issue(&user.email)?;
    tracing::info!(
        "User {} logged in; token valid for {}h",
        user.id,
        state.tokens.ttl().num_hours()
    );

    Ok(Json(TokenResponse { token }))
}
