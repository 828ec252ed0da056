use async_trait::async_trait;
use chrono::{DateTime, Utc};

use carebell_models::reminder::ReminderId;

/// Data an alarm carries from registration to the moment it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmPayload {
    pub reminder_id: ReminderId,
    pub title: String,
}

impl AlarmPayload {
    pub fn new(reminder_id: ReminderId, title: impl Into<String>) -> Self {
        Self {
            reminder_id,
            title: title.into(),
        }
    }
}

/// Called when a registered alarm reaches its fire time.
#[async_trait]
pub trait AlarmReceiver: Send + Sync + 'static {
    async fn on_alarm_fired(&self, payload: AlarmPayload);
}

/// Exact one-shot alarms keyed by reminder id.
///
/// Registering an id that already has a pending alarm replaces it.
#[async_trait]
pub trait AlarmService: Send + Sync + 'static {
    async fn set_exact(&self, fire_at: DateTime<Utc>, payload: AlarmPayload) -> anyhow::Result<()>;

    /// Returns `false` when nothing was pending for `reminder_id`.
    async fn cancel(&self, reminder_id: ReminderId) -> bool;

    async fn is_pending(&self, reminder_id: ReminderId) -> bool;

    async fn pending(&self) -> Vec<ReminderId>;
}
