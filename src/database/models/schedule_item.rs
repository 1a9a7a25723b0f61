use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub item_type: String,
    pub location: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable part of a schedule item, already validated and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFields {
    pub title: String,
    pub item_type: String,
    pub location: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub priority: String,
}

impl ScheduleItem {
    pub fn create(user_id: Uuid, fields: ScheduleFields, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: fields.title,
            item_type: fields.item_type,
            location: fields.location,
            description: fields.description,
            start_time: fields.start_time,
            end_time: fields.end_time,
            priority: fields.priority,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn fields(&self) -> ScheduleFields {
        ScheduleFields {
            title: self.title.clone(),
            item_type: self.item_type.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            priority: self.priority.clone(),
        }
    }

    /// Overwrite every mutable field. Identity and ownership are untouched.
    pub fn apply(&mut self, fields: ScheduleFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.item_type = fields.item_type;
        self.location = fields.location;
        self.description = fields.description;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.priority = fields.priority;
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
