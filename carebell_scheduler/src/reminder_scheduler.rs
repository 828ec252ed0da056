use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use carebell_models::reminder::{FireTimeParseError, Reminder, ReminderFireTime, ReminderId};

use crate::alarm::{AlarmPayload, AlarmService};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Reminder id must be positive, got {0}")]
    InvalidId(ReminderId),

    #[error(transparent)]
    InvalidFireTime(#[from] FireTimeParseError),

    #[error(transparent)]
    Registration(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub id: ReminderId,
    pub fire_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled(ScheduledReminder),
    /// The fire time was not strictly in the future.
    SkippedPastDue,
    /// Bad input or the alarm facility refused the registration. Already logged.
    Rejected,
}

impl ScheduleOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled(_))
    }
}

/// Turns reminder dates and times into exact alarms.
///
/// Every failure is logged and reported as a [`ScheduleOutcome`]; nothing is
/// returned as an error to the caller.
pub struct ReminderScheduler {
    alarms: Arc<dyn AlarmService>,
    timezone: Tz,
}

impl ReminderScheduler {
    pub fn new(alarms: Arc<dyn AlarmService>, timezone: Tz) -> Self {
        Self { alarms, timezone }
    }

    pub async fn schedule_reminder(
        &self,
        id: ReminderId,
        title: &str,
        date: &str,
        time: &str,
    ) -> ScheduleOutcome {
        let result = self.parse_and_schedule(id, title, date, time).await;
        finish(id, result)
    }

    pub async fn schedule(&self, reminder: &Reminder) -> ScheduleOutcome {
        let result = self
            .try_schedule(reminder.id, &reminder.title, reminder.fire_time())
            .await;
        finish(reminder.id, result)
    }

    /// Removes a pending alarm. A notification that is already visible stays.
    pub async fn cancel_reminder(&self, id: ReminderId) -> bool {
        let cancelled = self.alarms.cancel(id).await;
        if !cancelled {
            log::debug!("No pending alarm to cancel. ReminderId {}", id);
        }

        cancelled
    }

    pub async fn is_scheduled(&self, id: ReminderId) -> bool {
        self.alarms.is_pending(id).await
    }

    pub async fn scheduled(&self) -> Vec<ReminderId> {
        self.alarms.pending().await
    }

    async fn parse_and_schedule(
        &self,
        id: ReminderId,
        title: &str,
        date: &str,
        time: &str,
    ) -> Result<Option<ScheduledReminder>, ScheduleError> {
        let fire_time = ReminderFireTime::parse(date, time)?;
        self.try_schedule(id, title, fire_time).await
    }

    async fn try_schedule(
        &self,
        id: ReminderId,
        title: &str,
        fire_time: ReminderFireTime,
    ) -> Result<Option<ScheduledReminder>, ScheduleError> {
        if id <= 0 {
            return Err(ScheduleError::InvalidId(id));
        }

        let fire_at = fire_time.to_utc(&self.timezone)?;

        if get_target_delay(fire_at, Utc::now()).is_none() {
            log::info!(
                "Reminder fire time {} is not in the future, skipping. ReminderId {}",
                fire_time,
                id
            );
            return Ok(None);
        }

        self.alarms
            .set_exact(fire_at, AlarmPayload::new(id, title))
            .await?;

        Ok(Some(ScheduledReminder { id, fire_at }))
    }
}

fn finish(
    id: ReminderId,
    result: Result<Option<ScheduledReminder>, ScheduleError>,
) -> ScheduleOutcome {
    match result {
        Ok(Some(scheduled)) => ScheduleOutcome::Scheduled(scheduled),
        Ok(None) => ScheduleOutcome::SkippedPastDue,
        Err(error) => {
            log::error!(
                "Failed to schedule reminder. [reminder_id = {}, error = {}]",
                id,
                error
            );
            ScheduleOutcome::Rejected
        }
    }
}

/// Time left until `fire_at`, or `None` unless it is strictly after `now`.
pub fn get_target_delay(fire_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<TimeDelta> {
    let delay = fire_at - now;
    (delay > TimeDelta::zero()).then_some(delay)
}
