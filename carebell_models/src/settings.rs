use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::user::PatientId;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown timezone {0:?}")]
    UnknownTimezone(String),
}

#[derive(Deserialize, Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PatientSettings {
    pub id: PatientId,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationSettings {
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            channel_id: default_channel_id(),
            channel_name: default_channel_name(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub patient: PatientSettings,
    /// IANA timezone name used to resolve reminder dates and times.
    pub timezone: String,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Settings {
    pub fn timezone(&self) -> Result<Tz, SettingsError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SettingsError::UnknownTimezone(self.timezone.clone()))
    }
}

fn default_channel_id() -> String {
    "reminder_channel".to_owned()
}

fn default_channel_name() -> String {
    "Reminders".to_owned()
}
