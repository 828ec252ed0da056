use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

use carebell_models::reminder::{
    FireTimeParseError, RecurrencePattern, Reminder, ReminderFireTime, ReminderId,
    ReminderParseError, ReminderStatus,
};

#[derive(Debug, Error)]
pub(crate) enum ReminderRowError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    FireTime(#[from] FireTimeParseError),

    #[error(transparent)]
    Field(#[from] ReminderParseError),
}

#[derive(Deserialize, Debug)]
pub(crate) struct StatusResponse {
    #[serde(deserialize_with = "loose_bool")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ListRemindersResponse {
    #[serde(deserialize_with = "loose_bool")]
    pub success: bool,
    /// Kept raw so one malformed row does not fail the whole listing.
    #[serde(default)]
    pub reminders: Vec<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ReminderRow {
    #[serde(alias = "reminder_id", deserialize_with = "loose_i64")]
    pub id: ReminderId,
    pub title: String,
    pub date: String,
    pub time: String,
    pub status: String,
    #[serde(default, alias = "isRecurring", deserialize_with = "loose_bool")]
    pub is_recurring: bool,
    #[serde(default, alias = "recurrencePattern")]
    pub recurrence_pattern: Option<String>,
}

impl ReminderRow {
    pub fn parse(raw: serde_json::Value) -> Result<Reminder, ReminderRowError> {
        let row: ReminderRow = serde_json::from_value(raw)?;
        Ok(row.try_into()?)
    }
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = ReminderRowError;

    fn try_from(value: ReminderRow) -> Result<Self, Self::Error> {
        let fire_time = ReminderFireTime::parse(&value.date, &value.time)?;
        let status = value.status.parse::<ReminderStatus>()?;
        let recurrence_pattern = if value.is_recurring {
            parse_recurrence(value.recurrence_pattern.as_deref())?
        } else {
            None
        };

        Ok(Self {
            id: value.id,
            title: value.title,
            scheduled_date: fire_time.date_time().date(),
            scheduled_time: fire_time.date_time().time(),
            is_recurring: value.is_recurring,
            recurrence_pattern,
            status,
        })
    }
}

fn parse_recurrence(
    pattern: Option<&str>,
) -> Result<Option<RecurrencePattern>, ReminderParseError> {
    match pattern {
        None | Some("") | Some("none") => Ok(None),
        Some(pattern) => pattern.parse().map(Some),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// PHP backends send numeric columns as either numbers or strings.
fn loose_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match LooseInt::deserialize(deserializer)? {
        LooseInt::Int(value) => Ok(value),
        LooseInt::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match LooseBool::deserialize(deserializer)? {
        LooseBool::Bool(value) => Ok(value),
        LooseBool::Int(0) => Ok(false),
        LooseBool::Int(1) => Ok(true),
        LooseBool::Int(other) => Err(de::Error::custom(format!("invalid boolean {other}"))),
        LooseBool::Text(text) => match text.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(de::Error::custom(format!("invalid boolean {other:?}"))),
        },
    }
}
