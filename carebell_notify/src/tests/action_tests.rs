use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use carebell_models::{
    reminder::{Reminder, ReminderId, ReminderStatus},
    user::PatientId,
};
use carebell_store::{InMemoryReminderStore, ReminderStore, StatusUpdate, StoreError};
use tokio::sync::Notify;

use super::{CHANNEL_ID, platform_with_channel};
use crate::{
    ActionKind, ActionTarget, InMemoryNotificationPlatform, NotificationActionHandler,
    NotificationDisplay,
};

struct TestContext {
    platform: Arc<InMemoryNotificationPlatform>,
    store: Arc<InMemoryReminderStore>,
    display: NotificationDisplay,
    handler: NotificationActionHandler,
}

impl TestContext {
    fn new() -> Self {
        let platform = platform_with_channel();
        let store = Arc::new(InMemoryReminderStore::new());
        let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);
        let handler = NotificationActionHandler::new(store.clone(), platform.clone());

        Self {
            platform,
            store,
            display,
            handler,
        }
    }
}

#[tokio::test]
async fn complete_dismisses_notification_and_sends_completed_once() {
    let ctx = TestContext::new();
    ctx.display.show_notification(42, "Morning Medicine");

    let intent = ctx
        .platform
        .tap(ActionTarget::new(42, ActionKind::Complete))
        .unwrap();
    ctx.handler.handle_action(intent).await.unwrap();

    assert!(ctx.platform.visible(42).is_none());
    assert_eq!(
        ctx.store.status_updates().await,
        vec![StatusUpdate {
            reminder_id: 42,
            status: ReminderStatus::Completed
        }]
    );
    assert_eq!(
        ctx.platform.toasts(),
        vec!["Marked \"Morning Medicine\" as completed".to_owned()]
    );
}

#[tokio::test]
async fn cancel_dismisses_notification_and_sends_cancelled_once() {
    let ctx = TestContext::new();
    ctx.display.show_notification(42, "Morning Medicine");

    let intent = ctx
        .platform
        .tap(ActionTarget::new(42, ActionKind::Cancel))
        .unwrap();
    ctx.handler.handle_action(intent).await.unwrap();

    assert!(ctx.platform.visible(42).is_none());
    assert_eq!(
        ctx.store.status_updates().await,
        vec![StatusUpdate {
            reminder_id: 42,
            status: ReminderStatus::Cancelled
        }]
    );
    assert_eq!(
        ctx.platform.toasts(),
        vec!["Cancelled \"Morning Medicine\"".to_owned()]
    );
}

#[tokio::test]
async fn remote_failure_still_dismisses_notification() {
    let ctx = TestContext::new();
    ctx.store.set_unavailable(true);
    ctx.display.show_notification(42, "Morning Medicine");

    let intent = ctx
        .platform
        .tap(ActionTarget::new(42, ActionKind::Complete))
        .unwrap();
    ctx.handler.handle_action(intent).await.unwrap();

    assert!(ctx.platform.visible(42).is_none());
    assert_eq!(ctx.store.status_updates().await.len(), 1);
}

#[tokio::test]
async fn action_only_touches_its_own_reminder() {
    let ctx = TestContext::new();
    ctx.display.show_notification(1, "Insulin");
    ctx.display.show_notification(2, "Foot check");

    let intent = ctx
        .platform
        .tap(ActionTarget::new(1, ActionKind::Complete))
        .unwrap();
    ctx.handler.handle_action(intent).await.unwrap();

    assert_eq!(ctx.platform.visible_ids(), vec![2]);
}

#[test]
fn tapping_a_dismissed_notification_yields_nothing() {
    let ctx = TestContext::new();

    assert!(
        ctx.platform
            .tap(ActionTarget::new(99, ActionKind::Complete))
            .is_none()
    );
}

/// Holds every status update until the gate is opened.
struct GatedStore {
    gate: Arc<Notify>,
    calls: AtomicUsize,
}

#[async_trait]
impl ReminderStore for GatedStore {
    async fn update_status(
        &self,
        _reminder_id: ReminderId,
        _status: ReminderStatus,
    ) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(())
    }

    async fn list_reminders(&self, _patient_id: PatientId) -> Result<Vec<Reminder>, StoreError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn dismissal_does_not_wait_for_the_network() {
    let platform = platform_with_channel();
    let gate = Arc::new(Notify::new());
    let store = Arc::new(GatedStore {
        gate: gate.clone(),
        calls: AtomicUsize::new(0),
    });
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);
    let handler = NotificationActionHandler::new(store.clone(), platform.clone());
    display.show_notification(42, "Morning Medicine");

    let intent = platform
        .tap(ActionTarget::new(42, ActionKind::Complete))
        .unwrap();
    let update = handler.handle_action(intent);

    assert!(platform.visible(42).is_none());

    tokio::task::yield_now().await;
    assert!(!update.is_finished());

    gate.notify_one();
    update.await.unwrap();

    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}
