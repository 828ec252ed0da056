use async_trait::async_trait;

use carebell_scheduler::{AlarmPayload, AlarmReceiver};

use crate::display::NotificationDisplay;

/// Shows the reminder notification as soon as its alarm fires.
///
/// The reminder is not looked up in the store first, so a reminder cancelled
/// remotely after scheduling still notifies.
pub struct NotificationAlarmReceiver {
    display: NotificationDisplay,
}

impl NotificationAlarmReceiver {
    pub fn new(display: NotificationDisplay) -> Self {
        Self { display }
    }
}

#[async_trait]
impl AlarmReceiver for NotificationAlarmReceiver {
    async fn on_alarm_fired(&self, payload: AlarmPayload) {
        let AlarmPayload { reminder_id, title } = payload;
        self.display.show_notification(reminder_id, &title);
    }
}
