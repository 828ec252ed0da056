use async_trait::async_trait;
use thiserror::Error;

use carebell_models::{
    reminder::{Reminder, ReminderId, ReminderStatus},
    user::PatientId,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid backend url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Backend responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Reminder {0} not found")]
    NotFound(ReminderId),

    #[error("Reminder store is unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub reminder_id: ReminderId,
    pub status: ReminderStatus,
}

/// Remote persistence for reminders, reached only through status updates and listing.
#[async_trait]
pub trait ReminderStore: Send + Sync + 'static {
    async fn update_status(
        &self,
        reminder_id: ReminderId,
        status: ReminderStatus,
    ) -> Result<(), StoreError>;

    async fn list_reminders(&self, patient_id: PatientId) -> Result<Vec<Reminder>, StoreError>;
}
