use crate::platform::NotificationPlatform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
    pub enable_vibration: bool,
    pub enable_lights: bool,
}

impl NotificationChannel {
    pub fn reminders(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: "Medication and foot care reminders".to_owned(),
            importance: Importance::High,
            enable_vibration: true,
            enable_lights: true,
        }
    }
}

pub fn ensure_channel(platform: &dyn NotificationPlatform, channel: &NotificationChannel) {
    if !platform.supports_channels() {
        log::debug!(
            "Platform has no notification channels, skipping setup of {}",
            channel.id
        );
        return;
    }

    platform.register_channel(channel);
    log::info!("Notification channel ready. [channel_id = {}]", channel.id);
}
