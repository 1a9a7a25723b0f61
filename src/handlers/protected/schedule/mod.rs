// handlers/protected/schedule/mod.rs - Schedule CRUD for the authenticated user
//
// Every handler here takes an `Identity`; items are always scoped to
// `identity.user_id`.

use uuid::Uuid;

use crate::database::models::ScheduleItem;
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;

pub mod add;
pub mod delete;
pub mod list;
pub mod update;

pub use add::add;
pub use delete::delete;
pub use list::list;
pub use update::update;

/// Ids are opaque to clients; anything that is not one of ours is simply unknown.
fn parse_item_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Schedule item not found"))
}

/// Load an item the caller owns: 404 when absent, 403 when owned by someone else.
async fn load_owned_item(
    state: &AppState,
    identity: &Identity,
    raw_id: &str,
) -> Result<ScheduleItem, ApiError> {
    let id = parse_item_id(raw_id)?;

    let item = state
        .store
        .find_item(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Schedule item not found"))?;

    if !item.is_owned_by(identity.user_id) {
        tracing::warn!(
            "User {} attempted to modify schedule item {} owned by {}",
            identity.user_id,
            item.id,
            item.user_id
        );
        return Err(ApiError::forbidden("You do not have permission to modify this item"));
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_id_is_not_found() {
        let err = parse_item_id("42").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn uuid_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_item_id(&id.to_string()).unwrap(), id);
    }
}
