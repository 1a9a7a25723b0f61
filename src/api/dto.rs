use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::database::models::{ScheduleFields, ScheduleItem, User};
use crate::error::{ApiError, FieldErrors};

use super::format::{render_local_datetime, TimestampInput};
use super::validate::{check, field_errors, not_blank, optional_password, password_rule};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl LoginRequest {
    pub fn check(&self) -> Result<(), ApiError> {
        check(self, "Email and password are required")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"), email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "password_rule"))]
    pub password: String,
}

impl RegisterRequest {
    pub fn check(&self) -> Result<(), ApiError> {
        check(self, "Invalid registration")
    }
}

/// Partial profile update; absent fields are left alone.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub last_name: Option<String>,
    #[validate(custom(function = "optional_password"))]
    pub password: Option<String>,
}

impl UserPatch {
    pub fn check(&self) -> Result<(), ApiError> {
        check(self, "Invalid profile update")
    }

    /// A blank password means "keep the current one".
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Merge the name fields; the password is hashed by the caller.
    pub fn apply_names(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
    }
}

/// Schedule item as sent by clients, for both add and update.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleItemInput {
    #[validate(required, custom(function = "not_blank"), length(max = 100))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[validate(required, custom(function = "not_blank"), length(max = 50))]
    pub item_type: Option<String>,
    #[validate(required, custom(function = "not_blank"), length(max = 100))]
    pub location: Option<String>,
    #[validate(required, custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "timestamp_given"))]
    pub start_time: TimestampInput,
    #[validate(custom(function = "timestamp_given"))]
    pub end_time: TimestampInput,
    #[validate(required, custom(function = "not_blank"), length(max = 20))]
    pub priority: Option<String>,
}

impl ScheduleItemInput {
    /// Normalize priority to lowercase, then validate every field.
    pub fn into_fields(mut self) -> Result<ScheduleFields, ApiError> {
        // Limits apply to the stored (lowercased) priority
        self.priority = self.priority.map(|p| p.to_lowercase());

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        if let (TimestampInput::Valid(start), TimestampInput::Valid(end)) =
            (&self.start_time, &self.end_time)
        {
            if end <= start {
                errors
                    .entry("endTime".to_string())
                    .or_insert_with(|| "End time must be after start time".to_string());
            }
        }

        if !errors.is_empty() {
            return Err(ApiError::validation_error("Invalid schedule item", Some(errors)));
        }

        match self {
            ScheduleItemInput {
                title: Some(title),
                item_type: Some(item_type),
                location: Some(location),
                description: Some(description),
                start_time: TimestampInput::Valid(start_time),
                end_time: TimestampInput::Valid(end_time),
                priority: Some(priority),
            } => Ok(ScheduleFields {
                title,
                item_type,
                location,
                description,
                start_time,
                end_time,
                priority,
            }),
            _ => Err(ApiError::validation_error("Invalid schedule item", None)),
        }
    }

    /// Fill absent fields from `existing`, then validate the result.
    pub fn merge_onto(self, existing: &ScheduleFields) -> Result<ScheduleFields, ApiError> {
        let keep = |ts: TimestampInput, current| match ts {
            TimestampInput::Missing => TimestampInput::Valid(current),
            other => other,
        };

        ScheduleItemInput {
            title: self.title.or_else(|| Some(existing.title.clone())),
            item_type: self.item_type.or_else(|| Some(existing.item_type.clone())),
            location: self.location.or_else(|| Some(existing.location.clone())),
            description: self.description.or_else(|| Some(existing.description.clone())),
            start_time: keep(self.start_time, existing.start_time),
            end_time: keep(self.end_time, existing.end_time),
            priority: self.priority.or_else(|| Some(existing.priority.clone())),
        }
        .into_fields()
    }
}

fn timestamp_given(value: &TimestampInput) -> Result<(), ValidationError> {
    match value {
        TimestampInput::Valid(_) => Ok(()),
        TimestampInput::Missing => Err(ValidationError::new("required")),
        TimestampInput::Invalid(raw) => {
            let mut error = ValidationError::new("datetime");
            error.message = Some(format!("'{}' is not a valid date-time", raw).into());
            Err(error)
        }
    }
}

/// Transport representation of a schedule item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemDto {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub location: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub priority: String,
}

impl From<&ScheduleItem> for ScheduleItemDto {
    fn from(item: &ScheduleItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            item_type: item.item_type.clone(),
            location: item.location.clone(),
            description: item.description.clone(),
            start_time: render_local_datetime(&item.start_time),
            end_time: render_local_datetime(&item.end_time),
            priority: item.priority.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> ScheduleItemInput {
        serde_json::from_value(value).unwrap()
    }

    fn standup() -> serde_json::Value {
        json!({
            "title": "Standup",
            "type": "Work",
            "location": "Room 1",
            "description": "Daily sync",
            "startTime": "2024-01-01T09:00",
            "endTime": "2024-01-01T09:15",
            "priority": "HIGH"
        })
    }

    fn field_errors(err: ApiError) -> serde_json::Value {
        err.to_json()["field_errors"].clone()
    }

    #[test]
    fn valid_input_lowercases_priority() {
        let fields = input(standup()).into_fields().unwrap();
        assert_eq!(fields.priority, "high");
        assert_eq!(fields.title, "Standup");
        assert_eq!(fields.item_type, "Work");
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = input(json!({ "title": "  " })).into_fields().unwrap_err();
        let errors = field_errors(err);
        for field in ["title", "type", "location", "description", "startTime", "endTime", "priority"] {
            assert!(errors.get(field).is_some(), "missing error for {field}: {errors}");
        }
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let mut body = standup();
        body["title"] = json!("x".repeat(101));
        body["priority"] = json!("p".repeat(21));
        let errors = field_errors(input(body).into_fields().unwrap_err());
        assert!(errors.get("title").is_some());
        assert!(errors.get("priority").is_some());
        assert!(errors.get("location").is_none());
    }

    #[test]
    fn priority_limit_applies_after_lowercasing() {
        // "İ" lowercases to two characters
        let mut body = standup();
        body["priority"] = json!("İ".repeat(20));
        let errors = field_errors(input(body).into_fields().unwrap_err());
        assert_eq!(errors["priority"], "Priority must be at most 20 characters");

        let mut body = standup();
        body["priority"] = json!("İ".repeat(10));
        let fields = input(body).into_fields().unwrap();
        assert_eq!(fields.priority, "İ".repeat(10).to_lowercase());
        assert_eq!(fields.priority.chars().count(), 20);
    }

    #[test]
    fn end_must_follow_start() {
        let mut body = standup();
        body["endTime"] = json!("2024-01-01T08:00");
        let errors = field_errors(input(body).into_fields().unwrap_err());
        assert_eq!(errors["endTime"], "End time must be after start time");
    }

    #[test]
    fn unparseable_timestamp_is_a_field_error() {
        let mut body = standup();
        body["startTime"] = json!("monday morning");
        let errors = field_errors(input(body).into_fields().unwrap_err());
        assert!(errors["startTime"].as_str().unwrap().contains("monday morning"));
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let existing = input(standup()).into_fields().unwrap();
        let merged = input(json!({ "title": "Retro", "priority": "Medium" }))
            .merge_onto(&existing)
            .unwrap();

        assert_eq!(merged.title, "Retro");
        assert_eq!(merged.priority, "medium");
        assert_eq!(merged.location, existing.location);
        assert_eq!(merged.start_time, existing.start_time);
    }

    #[test]
    fn merge_still_validates() {
        let existing = input(standup()).into_fields().unwrap();
        let err = input(json!({ "endTime": "2023-12-31T09:00" }))
            .merge_onto(&existing)
            .unwrap_err();
        assert!(field_errors(err).get("endTime").is_some());
    }

    #[test]
    fn dto_renders_wire_names() {
        let fields = input(standup()).into_fields().unwrap();
        let item = ScheduleItem::create(Uuid::new_v4(), fields, chrono::Utc::now());
        let value = serde_json::to_value(ScheduleItemDto::from(&item)).unwrap();

        assert_eq!(value["type"], "Work");
        assert_eq!(value["startTime"], "2024-01-01T09:00");
        assert_eq!(value["endTime"], "2024-01-01T09:15");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["id"], json!(item.id));
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn register_request_validation() {
        let ok = RegisterRequest {
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
        };
        assert!(ok.check().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".into(),
            password: "123".into(),
            ..Default::default()
        };
        let errors = field_errors(bad.check().unwrap_err());
        for field in ["firstName", "lastName", "email", "password"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn user_patch_blank_password_is_ignored() {
        let patch: UserPatch = serde_json::from_value(json!({ "password": "  " })).unwrap();
        assert!(patch.check().is_ok());
        assert_eq!(patch.new_password(), None);

        let patch: UserPatch = serde_json::from_value(json!({ "password": "abc" })).unwrap();
        assert!(patch.check().is_err());
    }

    #[test]
    fn user_patch_applies_present_names_only() {
        let mut user = crate::database::models::NewUser {
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
        }
        .into_user(chrono::Utc::now());

        let patch: UserPatch = serde_json::from_value(json!({ "lastName": "Pleasance" })).unwrap();
        patch.check().unwrap();
        patch.apply_names(&mut user);

        assert_eq!(user.first_name, "Alice");
        assert_eq!(user.last_name, "Pleasance");
    }
}
