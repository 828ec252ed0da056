use std::collections::HashSet;
use std::sync::Arc;

use super::{CHANNEL_ID, platform_with_channel};
use crate::{ActionKind, ActionTarget, InMemoryNotificationPlatform, NotificationDisplay};

#[test]
fn notification_has_two_distinct_actions() {
    let platform = platform_with_channel();
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    assert!(display.show_notification(42, "Morning Medicine"));

    let notification = platform.visible(42).unwrap();
    assert_eq!(notification.title, "Morning Medicine");
    assert_eq!(notification.channel_id, CHANNEL_ID);

    let targets: HashSet<ActionTarget> = notification.actions.iter().map(|a| a.target).collect();
    assert_eq!(
        targets,
        HashSet::from([
            ActionTarget::new(42, ActionKind::Complete),
            ActionTarget::new(42, ActionKind::Cancel),
        ])
    );

    let labels: Vec<&str> = notification.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Complete", "Cancel"]);
    assert!(notification.actions.iter().all(|a| a.title == "Morning Medicine"));
}

#[test]
fn action_targets_of_different_reminders_never_collide() {
    let platform = platform_with_channel();
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    for id in [1, 12, 120, i64::MAX] {
        display.show_notification(id, "Dose");
    }

    let targets: HashSet<ActionTarget> = platform
        .visible_ids()
        .into_iter()
        .flat_map(|id| platform.visible(id).unwrap().actions)
        .map(|action| action.target)
        .collect();

    assert_eq!(targets.len(), 8);
}

#[test]
fn missing_permission_shows_nothing() {
    let platform = platform_with_channel();
    platform.set_permission(false);
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    assert!(!display.show_notification(42, "Morning Medicine"));
    assert!(platform.visible_ids().is_empty());
}

#[test]
fn posting_same_id_replaces_visible_notification() {
    let platform = platform_with_channel();
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    display.show_notification(7, "First");
    display.show_notification(7, "Second");

    assert_eq!(platform.visible_ids(), vec![7]);
    assert_eq!(platform.visible(7).unwrap().title, "Second");
}

#[test]
fn unregistered_channel_is_refused() {
    let platform = Arc::new(InMemoryNotificationPlatform::new());
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    assert!(!display.show_notification(42, "Morning Medicine"));
    assert!(platform.visible_ids().is_empty());
}

#[test]
fn platform_without_channels_still_posts() {
    let platform = Arc::new(InMemoryNotificationPlatform::without_channels());
    let display = NotificationDisplay::new(platform.clone(), CHANNEL_ID);

    assert!(display.show_notification(42, "Morning Medicine"));
    assert_eq!(platform.visible_ids(), vec![42]);
}
