use carebell_models::reminder::ReminderId;
use carebell_notify::{
    ActionIntent, ActionTarget, InMemoryNotificationPlatform, Notification, NotificationChannel,
    NotificationPlatform,
};

/// Prints notifications to stdout and remembers the visible ones so typed
/// actions can be resolved like taps.
#[derive(Default)]
pub struct ConsoleNotificationPlatform {
    inner: InMemoryNotificationPlatform,
}

impl ConsoleNotificationPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap(&self, target: ActionTarget) -> Option<ActionIntent> {
        self.inner.tap(target)
    }

    pub fn visible_ids(&self) -> Vec<ReminderId> {
        self.inner.visible_ids()
    }
}

impl NotificationPlatform for ConsoleNotificationPlatform {
    fn supports_channels(&self) -> bool {
        self.inner.supports_channels()
    }

    fn register_channel(&self, channel: &NotificationChannel) {
        self.inner.register_channel(channel);
    }

    fn has_permission(&self) -> bool {
        self.inner.has_permission()
    }

    fn post(&self, notification: Notification) -> anyhow::Result<()> {
        let id = notification.id;
        let line = format!(
            "🔔 [{}] {}: {}  (complete {id} | cancel {id})",
            notification.channel_id, notification.title, notification.body
        );

        self.inner.post(notification)?;
        println!("{line}");
        Ok(())
    }

    fn cancel(&self, id: ReminderId) {
        self.inner.cancel(id);
        println!("Dismissed notification for reminder {id}");
    }

    fn show_toast(&self, message: &str) {
        self.inner.show_toast(message);
        println!("💬 {message}");
    }
}
