use carebell_models::{reminder::ReminderStatus, user::PatientId};
use carebell_scheduler::{ReminderScheduler, ScheduleOutcome};
use carebell_store::ReminderStore;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub scheduled: usize,
    pub past_due: usize,
    pub rejected: usize,
    pub not_pending: usize,
}

/// Schedules every pending reminder the store lists for `patient_id`.
pub async fn schedule_pending(
    store: &dyn ReminderStore,
    scheduler: &ReminderScheduler,
    patient_id: PatientId,
) -> SyncSummary {
    let reminders = match store.list_reminders(patient_id).await {
        Ok(reminders) => reminders,
        Err(error) => {
            log::error!(
                "Failed to list reminders. [patient_id = {}, error = {}]",
                patient_id,
                error
            );
            return SyncSummary::default();
        }
    };

    let mut summary = SyncSummary::default();
    for reminder in &reminders {
        if reminder.status != ReminderStatus::Pending {
            summary.not_pending += 1;
            continue;
        }

        match scheduler.schedule(reminder).await {
            ScheduleOutcome::Scheduled(_) => summary.scheduled += 1,
            ScheduleOutcome::SkippedPastDue => summary.past_due += 1,
            ScheduleOutcome::Rejected => summary.rejected += 1,
        }
    }

    log::info!(
        "Reminder sync finished. [patient_id = {}, summary = {:?}]",
        patient_id,
        summary
    );

    summary
}
