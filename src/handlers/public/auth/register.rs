// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::extract::State;

use crate::api::{ApiJson, RegisterRequest};
use crate::auth::hash_password;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/register - Create an account with the default role
///
/// Expected Input:
/// ```json
/// { "firstName": "Alice", "lastName": "Liddell", "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// A taken email is rejected with 400 and the existing account is left untouched.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<&'static str, ApiError> {
    payload.check()?;

    if state.store.find_user_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::conflict("Email is already in use"));
    }

    let password_hash = hash_password(&payload.password, state.bcrypt_cost()).await?;

    // A concurrent registration can still win the race; the unique
    // constraint surfaces that as the same conflict.
    let user = state
        .store
        .insert_user(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password_hash,
        })
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok("User registered successfully")
}
