use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;

use super::*;

#[test]
fn parses_full_date_and_time() {
    let fire_time = ReminderFireTime::parse("2026-10-19", "08:00:00").unwrap();

    assert_eq!(
        *fire_time.date_time(),
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    );
}

#[test]
fn parses_time_without_seconds() {
    let fire_time = ReminderFireTime::parse("2026-10-19", "21:30").unwrap();

    assert_eq!(fire_time.date_time().time(), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
}

#[test]
fn rejects_out_of_range_date() {
    assert_eq!(
        ReminderFireTime::parse("2024-13-40", "08:00:00"),
        Err(FireTimeParseError::InvalidDate("2024-13-40".to_owned()))
    );
}

#[test]
fn rejects_out_of_range_time() {
    assert_eq!(
        ReminderFireTime::parse("2024-05-01", "25:61:00"),
        Err(FireTimeParseError::InvalidTime("25:61:00".to_owned()))
    );
}

#[test]
fn rejects_day_that_does_not_exist_in_month() {
    assert!(ReminderFireTime::parse("2023-02-29", "08:00:00").is_err());
    assert!(ReminderFireTime::parse("2024-02-29", "08:00:00").is_ok());
}

#[test]
fn rejects_loose_formats() {
    for (date, time) in [
        ("2024-5-1", "08:00:00"),
        ("2024-05-01", "8:00:00"),
        ("2024-05-01 ", "08:00:00"),
        ("2024-05-01", "08:00:00pm"),
        ("2024/05/01", "08:00:00"),
        ("", "08:00:00"),
        ("2024-05-01", ""),
    ] {
        assert!(
            ReminderFireTime::parse(date, time).is_err(),
            "{date:?} {time:?} should not parse"
        );
    }
}

#[test]
fn rejects_leap_second() {
    assert_eq!(
        ReminderFireTime::parse("2024-12-31", "23:59:60"),
        Err(FireTimeParseError::InvalidTime("23:59:60".to_owned()))
    );
}

#[test]
fn resolves_local_time_in_timezone() {
    let fire_time = ReminderFireTime::parse("2025-07-01", "08:00:00").unwrap();

    let instant = fire_time.to_utc(&Tz::Europe__Prague).unwrap();

    assert_eq!(instant, Utc.with_ymd_and_hms(2025, 7, 1, 6, 0, 0).unwrap());
}

#[test]
fn local_time_in_dst_gap_is_an_error() {
    let fire_time = ReminderFireTime::parse("2025-03-30", "02:30:00").unwrap();

    let result = fire_time.to_utc(&Tz::Europe__Prague);

    assert!(matches!(
        result,
        Err(FireTimeParseError::NonexistentLocalTime(..))
    ));
}

#[test]
fn ambiguous_local_time_picks_earlier_instant() {
    let fire_time = ReminderFireTime::parse("2025-10-26", "02:30:00").unwrap();

    let instant = fire_time.to_utc(&Tz::Europe__Prague).unwrap();

    assert_eq!(instant, Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap());
}

#[test]
fn status_wire_names() {
    for status in [
        ReminderStatus::Pending,
        ReminderStatus::Completed,
        ReminderStatus::Missed,
        ReminderStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<ReminderStatus>(), Ok(status));
    }

    assert_eq!(
        "done".parse::<ReminderStatus>(),
        Err(ReminderParseError::UnknownStatus("done".to_owned()))
    );
}

#[test]
fn only_completed_and_cancelled_are_terminal() {
    assert!(ReminderStatus::Completed.is_terminal());
    assert!(ReminderStatus::Cancelled.is_terminal());
    assert!(!ReminderStatus::Pending.is_terminal());
    assert!(!ReminderStatus::Missed.is_terminal());
}

#[test]
fn reminder_fire_time_combines_date_and_time() {
    let reminder = Reminder {
        id: 42,
        title: "Morning Medicine".to_owned(),
        scheduled_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        scheduled_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        is_recurring: true,
        recurrence_pattern: Some(RecurrencePattern::Daily),
        status: ReminderStatus::Pending,
    };

    assert_eq!(reminder.fire_time().to_string(), "2026-10-19 08:00:00");
}

proptest! {
    #[test]
    fn any_formatted_date_time_parses_back(
        year in 1970i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let date = format!("{year:04}-{month:02}-{day:02}");
        let time = format!("{hour:02}:{minute:02}:{second:02}");

        let fire_time = ReminderFireTime::parse(&date, &time).unwrap();

        prop_assert_eq!(fire_time.to_string(), format!("{date} {time}"));
    }

    #[test]
    fn hours_past_midnight_never_parse(hour in 24u32..100, minute in 0u32..60) {
        let time = format!("{hour:02}:{minute:02}:00");

        prop_assert!(ReminderFireTime::parse("2024-05-01", &time).is_err());
    }
}
