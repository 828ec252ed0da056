use carebell_models::reminder::{ReminderId, ReminderStatus};

use crate::channel::NotificationChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Complete,
    Cancel,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Complete => "Complete",
            ActionKind::Cancel => "Cancel",
        }
    }

    pub fn target_status(&self) -> ReminderStatus {
        match self {
            ActionKind::Complete => ReminderStatus::Completed,
            ActionKind::Cancel => ReminderStatus::Cancelled,
        }
    }
}

/// Identifies one action button of one reminder's notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionTarget {
    pub reminder_id: ReminderId,
    pub kind: ActionKind,
}

impl ActionTarget {
    pub fn new(reminder_id: ReminderId, kind: ActionKind) -> Self {
        Self { reminder_id, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub target: ActionTarget,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: ReminderId,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn action(&self, kind: ActionKind) -> Option<&NotificationAction> {
        self.actions.iter().find(|action| action.target.kind == kind)
    }
}

/// What the platform hands back when the user taps an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionIntent {
    pub target: ActionTarget,
    pub title: String,
}

impl From<&NotificationAction> for ActionIntent {
    fn from(value: &NotificationAction) -> Self {
        Self {
            target: value.target,
            title: value.title.clone(),
        }
    }
}

/// Notification facility of the host platform.
///
/// Notifications are keyed by reminder id: posting an id that is already
/// visible replaces it.
pub trait NotificationPlatform: Send + Sync + 'static {
    fn supports_channels(&self) -> bool;

    /// Registering a channel id that already exists does nothing.
    fn register_channel(&self, channel: &NotificationChannel);

    fn has_permission(&self) -> bool;

    fn post(&self, notification: Notification) -> anyhow::Result<()>;

    fn cancel(&self, id: ReminderId);

    fn show_toast(&self, message: &str);
}
