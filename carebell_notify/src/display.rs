use std::sync::Arc;

use carebell_models::reminder::ReminderId;

use crate::platform::{
    ActionKind, ActionTarget, Notification, NotificationAction, NotificationPlatform,
};

const NOTIFICATION_BODY: &str = "It's time for your scheduled reminder.";

pub struct NotificationDisplay {
    platform: Arc<dyn NotificationPlatform>,
    channel_id: String,
}

impl NotificationDisplay {
    pub fn new(platform: Arc<dyn NotificationPlatform>, channel_id: impl Into<String>) -> Self {
        Self {
            platform,
            channel_id: channel_id.into(),
        }
    }

    /// Posts the reminder notification with its Complete and Cancel actions.
    ///
    /// Returns `false` without posting when notification permission is missing
    /// or the platform refuses the notification.
    pub fn show_notification(&self, id: ReminderId, title: &str) -> bool {
        if !self.platform.has_permission() {
            log::debug!("Notification permission not granted. ReminderId {}", id);
            return false;
        }

        let notification = Notification {
            id,
            channel_id: self.channel_id.clone(),
            title: title.to_owned(),
            body: NOTIFICATION_BODY.to_owned(),
            actions: [ActionKind::Complete, ActionKind::Cancel]
                .into_iter()
                .map(|kind| NotificationAction {
                    label: kind.label().to_owned(),
                    target: ActionTarget::new(id, kind),
                    title: title.to_owned(),
                })
                .collect(),
        };

        match self.platform.post(notification) {
            Ok(()) => {
                log::info!("[NOTIFY] Reminder notification shown. ReminderId {}", id);
                true
            }
            Err(error) => {
                log::error!(
                    "Failed to post notification. [reminder_id = {}, error = {}]",
                    id,
                    error
                );
                false
            }
        }
    }
}
