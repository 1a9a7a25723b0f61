use axum::{extract::State, Json};

use crate::api::ScheduleItemDto;
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

/// GET /api/schedule/list - All items owned by the caller, by start time
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<ScheduleItemDto>>, ApiError> {
    let items = state.store.list_items_for_user(identity.user_id).await?;
    Ok(Json(items.iter().map(ScheduleItemDto::from).collect()))
}
