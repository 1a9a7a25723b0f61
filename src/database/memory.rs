use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewUser, ScheduleFields, ScheduleItem, User};
use super::store::{ScheduleStore, Store, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    items: HashMap<Uuid, ScheduleItem>,
}

/// Process-local `Store` with the same constraints as the SQL schema:
/// unique email and cascade delete from users to their items.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        let user = new_user.into_user(Utc::now());
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))?;

        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.password_hash = user.password_hash.clone();
        stored.roles = user.roles.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.items.retain(|_, item| item.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list_items_for_user(&self, user_id: Uuid) -> Result<Vec<ScheduleItem>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut items: Vec<ScheduleItem> = tables
            .items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<ScheduleItem>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.items.get(&id).cloned())
    }

    async fn insert_item(&self, user_id: Uuid, fields: ScheduleFields) -> Result<ScheduleItem, DatabaseError> {
        let mut tables = self.tables.write().await;
        // Foreign key: the owner must exist
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }

        let item = ScheduleItem::create(user_id, fields, Utc::now());
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, item: &ScheduleItem) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .items
            .get_mut(&item.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("schedule item {}", item.id)))?;

        stored.apply(item.fields(), item.updated_at);
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.items.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn fields(title: &str, start: NaiveDateTime) -> ScheduleFields {
        ScheduleFields {
            title: title.into(),
            item_type: "work".into(),
            location: "Office".into(),
            description: "Daily sync".into(),
            start_time: start,
            end_time: start + chrono::Duration::minutes(15),
            priority: "low".into(),
        }
    }

    #[tokio::test]
    async fn email_is_unique() {
        let store = MemoryStore::new();
        store.insert_user(new_user("alice@example.com")).await.unwrap();

        let err = store.insert_user(new_user("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));

        // Case-sensitive as stored
        assert!(store.insert_user(new_user("Alice@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn lists_only_owned_items_in_start_order() {
        let store = MemoryStore::new();
        let alice = store.insert_user(new_user("alice@example.com")).await.unwrap();
        let bob = store.insert_user(new_user("bob@example.com")).await.unwrap();

        store.insert_item(alice.id, fields("Late", at(15, 0))).await.unwrap();
        store.insert_item(alice.id, fields("Early", at(9, 0))).await.unwrap();
        store.insert_item(bob.id, fields("Bob's", at(10, 0))).await.unwrap();

        let titles: Vec<String> = store
            .list_items_for_user(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Early", "Late"]);
    }

    #[tokio::test]
    async fn insert_item_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = store
            .insert_item(Uuid::new_v4(), fields("Orphan", at(9, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_items() {
        let store = MemoryStore::new();
        let alice = store.insert_user(new_user("alice@example.com")).await.unwrap();
        let item = store.insert_item(alice.id, fields("Standup", at(9, 0))).await.unwrap();

        assert!(store.delete_user(alice.id).await.unwrap());
        assert!(store.find_item(item.id).await.unwrap().is_none());
        assert!(!store.delete_user(alice.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_item_overwrites_fields() {
        let store = MemoryStore::new();
        let alice = store.insert_user(new_user("alice@example.com")).await.unwrap();
        let mut item = store.insert_item(alice.id, fields("Standup", at(9, 0))).await.unwrap();

        item.apply(fields("Retro", at(16, 0)), Utc::now());
        store.update_item(&item).await.unwrap();

        let stored = store.find_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Retro");
        assert_eq!(stored.start_time, at(16, 0));
        assert_eq!(stored.user_id, alice.id);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let store = MemoryStore::new();
        let alice = store.insert_user(new_user("alice@example.com")).await.unwrap();
        let item = ScheduleItem::create(alice.id, fields("Ghost", at(9, 0)), Utc::now());
        assert!(matches!(
            store.update_item(&item).await,
            Err(DatabaseError::NotFound(_))
        ));
    }
}
