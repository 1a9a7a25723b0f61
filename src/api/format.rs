//! Wire format for schedule timestamps.
//!
//! Timestamps are local date-times without an offset. Input accepts minute or
//! second precision (`2024-01-01T09:00`, `2024-01-01T09:00:00`, fractional seconds
//! allowed); output drops seconds when they are zero.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

const INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn render_local_datetime(value: &NaiveDateTime) -> String {
    if value.nanosecond() != 0 {
        value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    } else if value.second() != 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M").to_string()
    }
}

/// A timestamp field as received: absent, well-formed, or unparseable text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum TimestampInput {
    #[default]
    Missing,
    Valid(NaiveDateTime),
    Invalid(String),
}

impl<'de> Deserialize<'de> for TimestampInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(match raw {
            None => TimestampInput::Missing,
            Some(s) => match parse_local_datetime(&s) {
                Some(dt) => TimestampInput::Valid(dt),
                None => TimestampInput::Invalid(s),
            },
        })
    }
}
