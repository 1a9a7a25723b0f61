use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

use super::load_owned_item;

/// DELETE /api/schedule/delete/:id - Remove an item the caller owns
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let item = load_owned_item(&state, &identity, &id).await?;

    if !state.store.delete_item(item.id).await? {
        // Removed between lookup and delete
        return Err(ApiError::not_found("Schedule item not found"));
    }

    tracing::info!("User {} deleted schedule item {}", identity.user_id, item.id);
    Ok("Schedule item deleted successfully")
}
