use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub type ReminderId = i64;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const SHORT_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FireTimeParseError {
    #[error("Invalid reminder date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid reminder time {0:?}, expected HH:MM:SS or HH:MM")]
    InvalidTime(String),

    #[error("Local time {0} does not exist in timezone {1}")]
    NonexistentLocalTime(NaiveDateTime, String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderParseError {
    #[error("Unknown reminder status {0:?}")]
    UnknownStatus(String),

    #[error("Unknown recurrence pattern {0:?}")]
    UnknownRecurrence(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReminderStatus {
    Pending,
    Completed,
    Missed,
    Cancelled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Completed => "completed",
            ReminderStatus::Missed => "missed",
            ReminderStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled reminders never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReminderStatus::Completed | ReminderStatus::Cancelled)
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = ReminderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReminderStatus::Pending),
            "completed" => Ok(ReminderStatus::Completed),
            "missed" => Ok(ReminderStatus::Missed),
            "cancelled" => Ok(ReminderStatus::Cancelled),
            other => Err(ReminderParseError::UnknownStatus(other.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for RecurrencePattern {
    type Err = ReminderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RecurrencePattern::Daily),
            "weekly" => Ok(RecurrencePattern::Weekly),
            "monthly" => Ok(RecurrencePattern::Monthly),
            other => Err(ReminderParseError::UnknownRecurrence(other.to_owned())),
        }
    }
}

/// Wall-clock instant a reminder fires at, in the device's local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderFireTime(NaiveDateTime);

impl ReminderFireTime {
    pub fn new(inner: NaiveDateTime) -> Self {
        let normalized = inner.with_nanosecond(0).expect("Will never fail.");
        Self(normalized)
    }

    /// Strictly parses `YYYY-MM-DD` and `HH:MM:SS` (or `HH:MM`).
    ///
    /// Anything chrono would accept but that does not format back to the
    /// exact input (single digit fields, signed years, leap seconds) is
    /// rejected rather than coerced.
    pub fn parse(date: &str, time: &str) -> Result<Self, FireTimeParseError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;

        Ok(Self::new(date.and_time(time)))
    }

    pub fn date_time(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Resolves the local fire time in `tz`. Ambiguous times pick the earlier instant.
    pub fn to_utc(&self, tz: &Tz) -> Result<DateTime<Utc>, FireTimeParseError> {
        tz.from_local_datetime(&self.0)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| FireTimeParseError::NonexistentLocalTime(self.0, tz.to_string()))
    }
}

impl fmt::Display for ReminderFireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, FireTimeParseError> {
    let invalid = || FireTimeParseError::InvalidDate(date.to_owned());
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;

    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(invalid());
    }

    Ok(parsed)
}

fn parse_time(time: &str) -> Result<NaiveTime, FireTimeParseError> {
    let invalid = || FireTimeParseError::InvalidTime(time.to_owned());

    let parsed = [TIME_FORMAT, SHORT_TIME_FORMAT]
        .into_iter()
        .find_map(|format| {
            NaiveTime::parse_from_str(time, format)
                .ok()
                .filter(|parsed| parsed.format(format).to_string() == time)
        })
        .ok_or_else(invalid)?;

    // chrono keeps leap seconds as nanosecond overflow; 23:59:60 is not a reminder time.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }

    Ok(parsed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub status: ReminderStatus,
}

impl Reminder {
    pub fn fire_time(&self) -> ReminderFireTime {
        ReminderFireTime::new(self.scheduled_date.and_time(self.scheduled_time))
    }
}

#[cfg(test)]
mod tests;
