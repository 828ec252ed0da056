use std::sync::Arc;

use tokio::task::JoinHandle;

use carebell_store::ReminderStore;

use crate::platform::{ActionIntent, ActionKind, NotificationPlatform};

/// Reacts to Complete/Cancel taps on reminder notifications.
pub struct NotificationActionHandler {
    store: Arc<dyn ReminderStore>,
    platform: Arc<dyn NotificationPlatform>,
}

impl NotificationActionHandler {
    pub fn new(store: Arc<dyn ReminderStore>, platform: Arc<dyn NotificationPlatform>) -> Self {
        Self { store, platform }
    }

    /// Sends the status update on a detached task, then dismisses the
    /// notification without waiting for it.
    ///
    /// The returned handle may be dropped. The update is attempted once and
    /// its failure is only logged.
    pub fn handle_action(&self, intent: ActionIntent) -> JoinHandle<()> {
        let reminder_id = intent.target.reminder_id;
        let kind = intent.target.kind;
        let status = kind.target_status();
        let store = Arc::clone(&self.store);

        log::info!("[ACTION] {}. ReminderId {}", kind.label(), reminder_id);

        let update = tokio::spawn(async move {
            match store.update_status(reminder_id, status).await {
                Ok(()) => log::info!(
                    "Remote status saved. [reminder_id = {}, status = {}]",
                    reminder_id,
                    status
                ),
                Err(error) => log::error!(
                    "Failed to update remote status. [reminder_id = {}, status = {}, error = {}]",
                    reminder_id,
                    status,
                    error
                ),
            }
        });

        self.platform.cancel(reminder_id);
        let message = confirmation_message(kind, &intent.title);
        self.platform.show_toast(&message);

        update
    }
}

fn confirmation_message(kind: ActionKind, title: &str) -> String {
    match kind {
        ActionKind::Complete => format!("Marked \"{title}\" as completed"),
        ActionKind::Cancel => format!("Cancelled \"{title}\""),
    }
}
