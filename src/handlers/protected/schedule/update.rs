use axum::extract::{Path, State};
use chrono::Utc;

use crate::api::{ApiJson, ScheduleItemInput};
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

use super::load_owned_item;

/// PUT /api/schedule/update/:id - Overwrite an item the caller owns
///
/// Fields present in the body replace the stored ones; absent fields are kept.
/// The merged item must pass the same validation as `add`.
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ScheduleItemInput>,
) -> Result<&'static str, ApiError> {
    let mut item = load_owned_item(&state, &identity, &id).await?;

    let fields = payload.merge_onto(&item.fields())?;
    item.apply(fields, Utc::now());
    state.store.update_item(&item).await?;

    tracing::info!("User {} updated schedule item {}", identity.user_id, item.id);
    Ok("Schedule item updated successfully")
}
