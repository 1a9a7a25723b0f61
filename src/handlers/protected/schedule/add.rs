use axum::{extract::State, http::StatusCode, Json};

use crate::api::{ApiJson, ScheduleItemDto, ScheduleItemInput};
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

/// POST /api/schedule/add - Create an item owned by the caller
///
/// Expected Input:
/// ```json
/// {
///   "title": "Standup", "type": "Work", "location": "Room 1",
///   "description": "Daily sync", "startTime": "2024-01-01T09:00",
///   "endTime": "2024-01-01T09:15", "priority": "Low"
/// }
/// ```
///
/// Responds 201 with the stored item; priority comes back lowercased.
pub async fn add(
    State(state): State<AppState>,
    identity: Identity,
    ApiJson(payload): ApiJson<ScheduleItemInput>,
) -> Result<(StatusCode, Json<ScheduleItemDto>), ApiError> {
    let fields = payload.into_fields()?;
    let item = state.store.insert_item(identity.user_id, fields).await?;

    tracing::info!("User {} added schedule item {}", identity.user_id, item.id);
    Ok((StatusCode::CREATED, Json(ScheduleItemDto::from(&item))))
}
