mod alarm;
mod reminder_scheduler;
mod tokio_alarm_service;

pub use alarm::{AlarmPayload, AlarmReceiver, AlarmService};
pub use reminder_scheduler::{
    ReminderScheduler, ScheduleError, ScheduleOutcome, ScheduledReminder, get_target_delay,
};
pub use tokio_alarm_service::TokioAlarmService;
