use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::{
    sync::RwLock,
    task::{self, JoinHandle},
    time::Instant,
};
use tokio_util::sync::CancellationToken;

use carebell_models::reminder::ReminderId;

use crate::alarm::{AlarmPayload, AlarmReceiver, AlarmService};

struct PendingAlarm {
    generation: u64,
    fire_at: DateTime<Utc>,
    cancellation_token: CancellationToken,
    _task: JoinHandle<()>,
}

type AlarmTable = RwLock<HashMap<ReminderId, PendingAlarm>>;

/// Longest single sleep of an alarm task. Tokio timers wrap past about two
/// years, and the wall clock is only re-read between sleeps.
pub(crate) const MAX_SLEEP_CHUNK: Duration = Duration::from_secs(10 * 60);

/// Alarm facility backed by one tokio timer task per pending alarm.
///
/// Each task sleeps in chunks of at most [`MAX_SLEEP_CHUNK`] and fires once
/// either the wall clock reaches the fire time or the monotonic time measured
/// since registration has elapsed. After a suspend or a forward wall clock
/// change the alarm can therefore be up to one chunk late. Moving the wall
/// clock backwards does not delay it past the originally measured interval.
/// Nothing wakes the process from suspend, and alarms do not survive a restart.
pub struct TokioAlarmService {
    alarms: Arc<AlarmTable>,
    receiver: Arc<dyn AlarmReceiver>,
    shutdown: CancellationToken,
    next_generation: AtomicU64,
}

impl TokioAlarmService {
    pub fn new(receiver: Arc<dyn AlarmReceiver>) -> Self {
        Self {
            alarms: Arc::new(RwLock::new(HashMap::new())),
            receiver,
            shutdown: CancellationToken::new(),
            next_generation: AtomicU64::new(0),
        }
    }

    fn spawn_alarm(
        &self,
        generation: u64,
        fire_at: DateTime<Utc>,
        delay: Duration,
        payload: AlarmPayload,
        cancellation_token: CancellationToken,
    ) -> JoinHandle<()> {
        let alarms = Arc::clone(&self.alarms);
        let receiver = Arc::clone(&self.receiver);

        task::spawn(async move {
            let reminder_id = payload.reminder_id;
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::debug!("Alarm task stopped before firing. ReminderId {}", reminder_id);
                }
                _ = sleep_until_due(fire_at, delay) => {
                    if take_registration(&alarms, reminder_id, generation).await {
                        log::info!("[FIRED] Delivering alarm. ReminderId {}", reminder_id);
                        receiver.on_alarm_fired(payload).await;
                    }
                }
            }
        })
    }
}

impl Drop for TokioAlarmService {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl AlarmService for TokioAlarmService {
    async fn set_exact(
        &self,
        fire_at: DateTime<Utc>,
        payload: AlarmPayload,
    ) -> anyhow::Result<()> {
        if self.shutdown.is_cancelled() {
            anyhow::bail!("Alarm service is shut down")
        }

        let reminder_id = payload.reminder_id;
        let delay = (fire_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let cancellation_token = self.shutdown.child_token();

        // The task must not observe the table before its own entry is in it.
        let mut alarms = self.alarms.write().await;
        let task = self.spawn_alarm(
            generation,
            fire_at,
            delay,
            payload,
            cancellation_token.clone(),
        );
        let previous = alarms.insert(
            reminder_id,
            PendingAlarm {
                generation,
                fire_at,
                cancellation_token,
                _task: task,
            },
        );

        if let Some(previous) = previous {
            previous.cancellation_token.cancel();
            log::info!(
                "Replaced pending alarm. [reminder_id = {}, previous_fire_at = {}]",
                reminder_id,
                previous.fire_at
            );
        }

        log::info!(
            "[SCHEDULE] Alarm set for {} ({:?} from now). ReminderId {}",
            fire_at,
            delay,
            reminder_id
        );

        Ok(())
    }

    async fn cancel(&self, reminder_id: ReminderId) -> bool {
        match self.alarms.write().await.remove(&reminder_id) {
            Some(alarm) => {
                alarm.cancellation_token.cancel();
                log::info!("[CANCEL] Alarm removed. ReminderId {}", reminder_id);
                true
            }
            None => false,
        }
    }

    async fn is_pending(&self, reminder_id: ReminderId) -> bool {
        self.alarms.read().await.contains_key(&reminder_id)
    }

    async fn pending(&self) -> Vec<ReminderId> {
        let mut ids: Vec<ReminderId> = self.alarms.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

async fn sleep_until_due(fire_at: DateTime<Utc>, delay: Duration) {
    let deadline = Instant::now().checked_add(delay);

    loop {
        let monotonic_left = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        };

        match next_sleep(fire_at, Utc::now(), monotonic_left) {
            Some(chunk) => tokio::time::sleep(chunk).await,
            None => return,
        }
    }
}

/// How long to sleep before checking again, or `None` once the alarm is due
/// by either the wall clock or the monotonic interval.
pub(crate) fn next_sleep(
    fire_at: DateTime<Utc>,
    now: DateTime<Utc>,
    monotonic_left: Duration,
) -> Option<Duration> {
    let wall_left = (fire_at - now).to_std().unwrap_or(Duration::ZERO);
    let left = wall_left.min(monotonic_left);

    (!left.is_zero()).then(|| left.min(MAX_SLEEP_CHUNK))
}

/// Removes the registration if it still belongs to the alarm of `generation`.
async fn take_registration(alarms: &AlarmTable, reminder_id: ReminderId, generation: u64) -> bool {
    let mut alarms = alarms.write().await;
    match alarms.get(&reminder_id) {
        Some(alarm)
            if alarm.generation == generation && !alarm.cancellation_token.is_cancelled() =>
        {
            alarms.remove(&reminder_id);
            true
        }
        _ => false,
    }
}
