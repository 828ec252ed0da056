mod action;
mod channel;
mod display;
mod in_memory;
mod platform;
mod receiver;

pub use action::NotificationActionHandler;
pub use channel::{Importance, NotificationChannel, ensure_channel};
pub use display::NotificationDisplay;
pub use in_memory::InMemoryNotificationPlatform;
pub use platform::{
    ActionIntent, ActionKind, ActionTarget, Notification, NotificationAction, NotificationPlatform,
};
pub use receiver::NotificationAlarmReceiver;
