use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use carebell_models::reminder::ReminderId;

use crate::{
    channel::NotificationChannel,
    platform::{ActionIntent, ActionTarget, Notification, NotificationPlatform},
};

#[derive(Default)]
struct PlatformState {
    channels: HashMap<String, NotificationChannel>,
    visible: HashMap<ReminderId, Notification>,
    toasts: Vec<String>,
}

/// Notification table held in memory, with the upsert-by-id behaviour of a real shade.
pub struct InMemoryNotificationPlatform {
    state: Mutex<PlatformState>,
    permission: AtomicBool,
    channels_supported: bool,
}

impl Default for InMemoryNotificationPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNotificationPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PlatformState::default()),
            permission: AtomicBool::new(true),
            channels_supported: true,
        }
    }

    pub fn without_channels() -> Self {
        Self {
            channels_supported: false,
            ..Self::new()
        }
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::Relaxed);
    }

    pub fn visible(&self, id: ReminderId) -> Option<Notification> {
        self.state().visible.get(&id).cloned()
    }

    pub fn visible_ids(&self) -> Vec<ReminderId> {
        let mut ids: Vec<ReminderId> = self.state().visible.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.state().channels.values().cloned().collect()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.state().toasts.clone()
    }

    /// Resolves a tap on a visible notification's action into the intent it carries.
    pub fn tap(&self, target: ActionTarget) -> Option<ActionIntent> {
        self.state()
            .visible
            .get(&target.reminder_id)?
            .action(target.kind)
            .map(ActionIntent::from)
    }

    fn state(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationPlatform for InMemoryNotificationPlatform {
    fn supports_channels(&self) -> bool {
        self.channels_supported
    }

    fn register_channel(&self, channel: &NotificationChannel) {
        self.state()
            .channels
            .entry(channel.id.clone())
            .or_insert_with(|| channel.clone());
    }

    fn has_permission(&self) -> bool {
        self.permission.load(Ordering::Relaxed)
    }

    fn post(&self, notification: Notification) -> anyhow::Result<()> {
        let mut state = self.state();
        if self.channels_supported && !state.channels.contains_key(&notification.channel_id) {
            anyhow::bail!("Unknown notification channel {}", notification.channel_id)
        }

        state.visible.insert(notification.id, notification);
        Ok(())
    }

    fn cancel(&self, id: ReminderId) {
        self.state().visible.remove(&id);
    }

    fn show_toast(&self, message: &str) {
        self.state().toasts.push(message.to_owned());
    }
}
