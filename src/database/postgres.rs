use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{NewUser, ScheduleFields, ScheduleItem, User};
use super::store::{ScheduleStore, Store, UserStore};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, roles, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, user_id, title, item_type, location, description, \
     start_time, end_time, priority, created_at, updated_at";

/// `Store` backed by PostgreSQL through sqlx
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let user = new_user.into_user(Utc::now());

        let inserted = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update_user(&self, user: &User) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, password_hash = $4, roles = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", user.id)));
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ScheduleStore for PgStore {
    async fn list_items_for_user(&self, user_id: Uuid) -> Result<Vec<ScheduleItem>, DatabaseError> {
        let items = sqlx::query_as::<_, ScheduleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM schedule_items WHERE user_id = $1 \
             ORDER BY start_time, id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<ScheduleItem>, DatabaseError> {
        let item = sqlx::query_as::<_, ScheduleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM schedule_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn insert_item(&self, user_id: Uuid, fields: ScheduleFields) -> Result<ScheduleItem, DatabaseError> {
        let item = ScheduleItem::create(user_id, fields, Utc::now());

        let inserted = sqlx::query_as::<_, ScheduleItem>(&format!(
            "INSERT INTO schedule_items ({ITEM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(item.id)
        .bind(item.user_id)
        .bind(&item.title)
        .bind(&item.item_type)
        .bind(&item.location)
        .bind(&item.description)
        .bind(item.start_time)
        .bind(item.end_time)
        .bind(&item.priority)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update_item(&self, item: &ScheduleItem) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE schedule_items SET title = $2, item_type = $3, location = $4, \
             description = $5, start_time = $6, end_time = $7, priority = $8, updated_at = $9 \
             WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.item_type)
        .bind(&item.location)
        .bind(&item.description)
        .bind(item.start_time)
        .bind(item.end_time)
        .bind(&item.priority)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("schedule item {}", item.id)));
        }
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM schedule_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
