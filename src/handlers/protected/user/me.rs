use axum::{extract::State, Json};

use crate::api::{ApiJson, UserPatch};
use crate::auth::hash_password;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

/// Re-read the account behind the identity; it may have been removed since the filter ran.
async fn current_user(state: &AppState, identity: &Identity) -> Result<User, ApiError> {
    state
        .store
        .find_user_by_email(&identity.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// GET /api/user/me - Current user's profile (never includes the password hash)
pub async fn me_get(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<User>, ApiError> {
    let user = current_user(&state, &identity).await?;
    Ok(Json(user))
}

/// PUT /api/user/me - Partial profile update
///
/// Expected Input (every field optional):
/// ```json
/// { "firstName": "Alice", "lastName": "Liddell", "password": "new-secret" }
/// ```
///
/// A blank password keeps the current one. Email cannot be changed here.
pub async fn me_put(
    State(state): State<AppState>,
    identity: Identity,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<&'static str, ApiError> {
    patch.check()?;

    let mut user = current_user(&state, &identity).await?;
    patch.apply_names(&mut user);
    if let Some(password) = patch.new_password() {
        user.password_hash = hash_password(password, state.bcrypt_cost()).await?;
    }

    state.store.update_user(&user).await?;

    tracing::info!("User {} updated their profile", user.id);
    Ok("User profile updated successfully")
}
