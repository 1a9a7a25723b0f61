use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewUser, ScheduleFields, ScheduleItem, User};

/// Credential store: account records keyed by id and unique email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::UniqueViolation` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Persists name, password hash and roles.
    async fn update_user(&self, user: &User) -> Result<(), DatabaseError>;

    /// Deletes the user and, by cascade, every schedule item it owns.
    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Schedule items, always scoped to an owning user.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Items owned by `user_id`, ordered by start time then id.
    async fn list_items_for_user(&self, user_id: Uuid) -> Result<Vec<ScheduleItem>, DatabaseError>;

    async fn find_item(&self, id: Uuid) -> Result<Option<ScheduleItem>, DatabaseError>;

    async fn insert_item(&self, user_id: Uuid, fields: ScheduleFields) -> Result<ScheduleItem, DatabaseError>;

    /// Persists the mutable fields of an existing item. `NotFound` if it vanished.
    async fn update_item(&self, item: &ScheduleItem) -> Result<(), DatabaseError>;

    async fn delete_item(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait Store: UserStore + ScheduleStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
