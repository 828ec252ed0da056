mod appsettings;
mod console;
mod console_platform;
mod reminder_sync;

use std::sync::Arc;

use carebell_notify::{
    NotificationActionHandler, NotificationAlarmReceiver, NotificationChannel,
    NotificationDisplay, ensure_channel,
};
use carebell_scheduler::{ReminderScheduler, TokioAlarmService};
use carebell_store::{HttpReminderStore, ReminderStore};

use console_platform::ConsoleNotificationPlatform;

/// Logs panics through the logger, then hands them to the hook that was installed before.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("Unhandled panic: {info}");
        default_hook(info);
    }));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();
    install_panic_hook();

    let settings = appsettings::load()?;
    let timezone = settings.timezone()?;
    log::info!(
        "Starting carebell. [patient_id = {}, timezone = {}]",
        settings.patient.id,
        timezone
    );

    let platform = Arc::new(ConsoleNotificationPlatform::new());
    let channel = NotificationChannel::reminders(
        &settings.notifications.channel_id,
        &settings.notifications.channel_name,
    );
    ensure_channel(platform.as_ref(), &channel);

    let store: Arc<dyn ReminderStore> =
        Arc::new(HttpReminderStore::new(&settings.backend.base_url)?);
    let display = NotificationDisplay::new(platform.clone(), channel.id.clone());
    let alarms = Arc::new(TokioAlarmService::new(Arc::new(
        NotificationAlarmReceiver::new(display),
    )));
    let scheduler = ReminderScheduler::new(alarms, timezone);
    let handler = NotificationActionHandler::new(store.clone(), platform.clone());

    reminder_sync::schedule_pending(store.as_ref(), &scheduler, settings.patient.id).await;

    console::run(&scheduler, &handler, &platform).await
}
