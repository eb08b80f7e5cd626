//! A single chat's repeating poll task.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dealwatch_core::ChatId;
use dealwatch_scraper::DealSource;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::tick::run_tick;
use crate::notifier::NotificationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Waiting for the next fire.
    Scheduled,
    /// A tick is in flight.
    Running,
    /// No further fires will happen.
    Cancelled,
}

/// Point-in-time view of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub chat_id: ChatId,
    pub interval_secs: u64,
    pub state: JobState,
    /// `None` while a tick runs, once cancelled, or when the interval
    /// reaches past the clock's range.
    pub next_fire_at: Option<Instant>,
}

#[derive(Debug)]
struct JobStatus {
    state: JobState,
    next_fire_at: Option<Instant>,
}

#[derive(Debug, Clone)]
struct SharedStatus(Arc<Mutex<JobStatus>>);

impl SharedStatus {
    fn new(first_fire: Instant) -> Self {
        Self(Arc::new(Mutex::new(JobStatus {
            state: JobState::Scheduled,
            next_fire_at: Some(first_fire),
        })))
    }

    fn read(&self) -> (JobState, Option<Instant>) {
        let status = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        (status.state, status.next_fire_at)
    }

    fn update(&self, state: JobState, next_fire_at: Option<Instant>) {
        let mut status = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        // Cancellation is terminal.
        if status.state == JobState::Cancelled {
            return;
        }
        status.state = state;
        status.next_fire_at = next_fire_at;
    }
}

pub(super) struct PollJob {
    chat_id: ChatId,
    interval: Duration,
    cancel: CancellationToken,
    status: SharedStatus,
    handle: JoinHandle<()>,
}

impl PollJob {
    /// Spawns the job task. The first tick fires without delay.
    pub(super) fn spawn(
        chat_id: ChatId,
        interval: Duration,
        source: Arc<dyn DealSource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let status = SharedStatus::new(Instant::now());

        let handle = tokio::spawn(run_job(
            chat_id,
            interval,
            cancel.clone(),
            status.clone(),
            source,
            sink,
        ));

        Self {
            chat_id,
            interval,
            cancel,
            status,
            handle,
        }
    }

    /// Prevents any further fire. An in-flight tick is allowed to finish.
    pub(super) fn cancel(&self) {
        self.status.update(JobState::Cancelled, None);
        self.cancel.cancel();
    }

    pub(super) fn snapshot(&self) -> JobSnapshot {
        let (state, next_fire_at) = self.status.read();
        JobSnapshot {
            chat_id: self.chat_id,
            interval_secs: self.interval.as_secs(),
            state,
            next_fire_at,
        }
    }

    pub(super) async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(chat_id = %self.chat_id, error = %e, "scheduler: job task ended abnormally");
        }
    }
}

/// Job task body. Ticks run inline, so ticks of one job never overlap.
async fn run_job(
    chat_id: ChatId,
    interval: Duration,
    cancel: CancellationToken,
    status: SharedStatus,
    source: Arc<dyn DealSource>,
    sink: Arc<dyn NotificationSink>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let deadline = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            deadline = ticker.tick() => deadline,
        };

        status.update(JobState::Running, None);
        run_tick(chat_id, source.as_ref(), sink.as_ref()).await;

        if cancel.is_cancelled() {
            break;
        }

        // An interval past the clock's range leaves no representable next fire.
        let next = deadline
            .checked_add(interval)
            .map(|next| next.max(Instant::now()));
        status.update(JobState::Scheduled, next);
    }

    status.update(JobState::Cancelled, None);
    tracing::debug!(%chat_id, "scheduler: job task finished");
}
