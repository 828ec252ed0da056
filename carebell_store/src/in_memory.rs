use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use carebell_models::{
    reminder::{Reminder, ReminderId, ReminderStatus},
    user::PatientId,
};

use crate::reminder_store::{ReminderStore, StatusUpdate, StoreError};

#[derive(Default)]
struct InMemoryState {
    reminders: Vec<(PatientId, Reminder)>,
    status_updates: Vec<StatusUpdate>,
}

/// Store kept in process memory. Records every status update request it receives.
#[derive(Default)]
pub struct InMemoryReminderStore {
    state: RwLock<InMemoryState>,
    unavailable: AtomicBool,
}

impl InMemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, patient_id: PatientId, reminder: Reminder) {
        let mut state = self.state.write().await;
        state.reminders.retain(|(_, existing)| existing.id != reminder.id);
        log::debug!("Stored reminder in memory. ReminderId {}", reminder.id);
        state.reminders.push((patient_id, reminder));
    }

    pub async fn get(&self, reminder_id: ReminderId) -> Option<Reminder> {
        let state = self.state.read().await;
        state
            .reminders
            .iter()
            .find(|(_, reminder)| reminder.id == reminder_id)
            .map(|(_, reminder)| reminder.clone())
    }

    pub async fn status_updates(&self) -> Vec<StatusUpdate> {
        self.state.read().await.status_updates.clone()
    }

    /// While unavailable, every call fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReminderStore for InMemoryReminderStore {
    async fn update_status(
        &self,
        reminder_id: ReminderId,
        status: ReminderStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.status_updates.push(StatusUpdate {
            reminder_id,
            status,
        });

        self.check_available()?;

        let (_, reminder) = state
            .reminders
            .iter_mut()
            .find(|(_, reminder)| reminder.id == reminder_id)
            .ok_or(StoreError::NotFound(reminder_id))?;
        reminder.status = status;

        Ok(())
    }

    async fn list_reminders(&self, patient_id: PatientId) -> Result<Vec<Reminder>, StoreError> {
        self.check_available()?;

        let state = self.state.read().await;
        Ok(state
            .reminders
            .iter()
            .filter(|(owner, _)| *owner == patient_id)
            .map(|(_, reminder)| reminder.clone())
            .collect())
    }
}
