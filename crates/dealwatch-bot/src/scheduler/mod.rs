//! Per-chat deal polling.
//!
//! [`PollingScheduler`] owns a registry with at most one repeating job per
//! chat. `start` replaces any existing job for the chat under the registry
//! lock, so two jobs for one chat are never both eligible to fire. The lock
//! is never held across a fetch or a send.

mod job;
mod tick;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dealwatch_core::ChatId;
use dealwatch_scraper::DealSource;
use thiserror::Error;

use crate::notifier::NotificationSink;

pub use job::{JobSnapshot, JobState};
pub use tick::{run_tick, TickFailure};

use job::PollJob;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid interval {value:?}: {reason}")]
    InvalidArgument { value: String, reason: String },
}

/// Result of [`PollingScheduler::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOutcome {
    /// Interval the new job fires at.
    pub interval_secs: u64,
    /// Whether an existing job for the chat was cancelled.
    pub replaced: bool,
}

/// Result of [`PollingScheduler::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NothingToStop,
}

pub struct PollingScheduler {
    source: Arc<dyn DealSource>,
    sink: Arc<dyn NotificationSink>,
    interval_secs: AtomicU64,
    jobs: Mutex<HashMap<ChatId, PollJob>>,
}

impl PollingScheduler {
    /// Creates an empty scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidArgument`] if `default_interval_secs`
    /// is zero.
    pub fn new(
        source: Arc<dyn DealSource>,
        sink: Arc<dyn NotificationSink>,
        default_interval_secs: u64,
    ) -> Result<Self, SchedulerError> {
        let interval_secs = validate_interval(default_interval_secs)?;
        Ok(Self {
            source,
            sink,
            interval_secs: AtomicU64::new(interval_secs),
            jobs: Mutex::new(HashMap::new()),
        })
    }

    /// The interval the next `start` will use.
    #[must_use]
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.load(Ordering::SeqCst)
    }

    /// Parses and applies an operator-supplied interval.
    ///
    /// Only future `start` calls see the new value; running jobs keep theirs.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidArgument`] for non-numeric, zero, or
    /// negative input. The configured interval is left unchanged.
    pub fn set_interval(&self, raw: &str) -> Result<u64, SchedulerError> {
        let trimmed = raw.trim();
        let secs = trimmed
            .parse::<i64>()
            .map_err(|e| SchedulerError::InvalidArgument {
                value: trimmed.to_string(),
                reason: e.to_string(),
            })?;
        let secs = u64::try_from(secs).map_err(|_| SchedulerError::InvalidArgument {
            value: trimmed.to_string(),
            reason: "must be a positive number of seconds".to_string(),
        })?;
        self.set_interval_secs(secs)
    }

    /// Typed variant of [`Self::set_interval`].
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidArgument`] if `secs` is zero.
    pub fn set_interval_secs(&self, secs: u64) -> Result<u64, SchedulerError> {
        let secs = validate_interval(secs)?;
        self.interval_secs.store(secs, Ordering::SeqCst);
        tracing::info!(interval_secs = secs, "scheduler: interval updated");
        Ok(secs)
    }

    /// Starts polling for `chat_id`, replacing any job it already has.
    ///
    /// The new job fires immediately, then every configured interval.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, chat_id: ChatId) -> StartOutcome {
        let interval_secs = self.interval_secs();

        let mut jobs = self.registry();
        let replaced = match jobs.remove(&chat_id) {
            Some(previous) => {
                previous.cancel();
                true
            }
            None => false,
        };
        let job = PollJob::spawn(
            chat_id,
            Duration::from_secs(interval_secs),
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
        );
        jobs.insert(chat_id, job);
        drop(jobs);

        tracing::info!(%chat_id, interval_secs, replaced, "scheduler: polling started");
        StartOutcome {
            interval_secs,
            replaced,
        }
    }

    /// Cancels the chat's job, if any.
    pub fn stop(&self, chat_id: ChatId) -> StopOutcome {
        let removed = self.registry().remove(&chat_id);
        match removed {
            Some(job) => {
                job.cancel();
                tracing::info!(%chat_id, "scheduler: polling stopped");
                StopOutcome::Stopped
            }
            None => StopOutcome::NothingToStop,
        }
    }

    /// Snapshot of the chat's active job.
    #[must_use]
    pub fn job(&self, chat_id: ChatId) -> Option<JobSnapshot> {
        self.registry().get(&chat_id).map(PollJob::snapshot)
    }

    /// Number of chats with an active job.
    #[must_use]
    pub fn active_jobs(&self) -> usize {
        self.registry().len()
    }

    /// Cancels every job and waits for their tasks to finish.
    pub async fn shutdown(&self) {
        let jobs: Vec<PollJob> = self.registry().drain().map(|(_, job)| job).collect();
        tracing::info!(count = jobs.len(), "scheduler: shutting down jobs");
        for job in jobs {
            job.cancel();
            job.join().await;
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<ChatId, PollJob>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        for job in self.registry().values() {
            job.cancel();
        }
    }
}

fn validate_interval(secs: u64) -> Result<u64, SchedulerError> {
    if secs == 0 {
        return Err(SchedulerError::InvalidArgument {
            value: secs.to_string(),
            reason: "must be a positive number of seconds".to_string(),
        });
    }
    Ok(secs)
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
