use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use carebell_models::reminder::ReminderId;
use carebell_notify::{ActionKind, ActionTarget, NotificationActionHandler};
use carebell_scheduler::{ReminderScheduler, ScheduleOutcome};

use crate::console_platform::ConsoleNotificationPlatform;

const HELP: &str = "Commands:
  schedule <id> <YYYY-MM-DD> <HH:MM[:SS]> <title...>
  unschedule <id>
  complete <id>
  cancel <id>
  pending
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Schedule {
        id: ReminderId,
        date: String,
        time: String,
        title: String,
    },
    Unschedule(ReminderId),
    Action(ActionTarget),
    Pending,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        bail!("Empty command")
    };

    let command = match name {
        "schedule" => {
            let id = parse_id(words.next())?;
            let date = words.next().context("Missing date")?.to_owned();
            let time = words.next().context("Missing time")?.to_owned();
            let title = words.collect::<Vec<_>>().join(" ");
            if title.is_empty() {
                bail!("Missing title")
            }

            Command::Schedule {
                id,
                date,
                time,
                title,
            }
        }
        "unschedule" => Command::Unschedule(parse_id(words.next())?),
        "complete" => Command::Action(ActionTarget::new(
            parse_id(words.next())?,
            ActionKind::Complete,
        )),
        "cancel" => Command::Action(ActionTarget::new(
            parse_id(words.next())?,
            ActionKind::Cancel,
        )),
        "pending" => Command::Pending,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command {other:?}, type `help` for the list"),
    };

    Ok(command)
}

fn parse_id(word: Option<&str>) -> anyhow::Result<ReminderId> {
    let word = word.context("Missing reminder id")?;
    word.parse()
        .with_context(|| format!("Invalid reminder id {word:?}"))
}

pub async fn run(
    scheduler: &ReminderScheduler,
    handler: &NotificationActionHandler,
    platform: &ConsoleNotificationPlatform,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Ctrl-C received, stopping");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(command, scheduler, handler, platform).await,
                    Err(error) => println!("{error:#}"),
                }
            }
        }
    }

    Ok(())
}

async fn execute(
    command: Command,
    scheduler: &ReminderScheduler,
    handler: &NotificationActionHandler,
    platform: &ConsoleNotificationPlatform,
) {
    match command {
        Command::Schedule {
            id,
            date,
            time,
            title,
        } => match scheduler.schedule_reminder(id, &title, &date, &time).await {
            ScheduleOutcome::Scheduled(scheduled) => {
                println!("Reminder {id} scheduled for {}", scheduled.fire_at)
            }
            ScheduleOutcome::SkippedPastDue => {
                println!("Reminder {id} is not in the future, nothing scheduled")
            }
            ScheduleOutcome::Rejected => println!("Reminder {id} was not scheduled, see the log"),
        },
        Command::Unschedule(id) => {
            if scheduler.cancel_reminder(id).await {
                println!("Alarm for reminder {id} removed");
            } else {
                println!("No pending alarm for reminder {id}");
            }
        }
        Command::Action(target) => match platform.tap(target) {
            // Detached: the update finishes in the background.
            Some(intent) => drop(handler.handle_action(intent)),
            None => println!("No visible notification for reminder {}", target.reminder_id),
        },
        Command::Pending => {
            println!("Pending alarms: {:?}", scheduler.scheduled().await);
            println!("Visible notifications: {:?}", platform.visible_ids());
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
