//! Chat command surface over [`PollingScheduler`].
//!
//! Every operation returns the reply text for the chat; scheduler errors are
//! turned into replies here and never cross this boundary.

use std::sync::Arc;

use dealwatch_core::ChatId;

use crate::messages;
use crate::scheduler::{PollingScheduler, StopOutcome};

#[derive(Clone)]
pub struct CommandLayer {
    scheduler: Arc<PollingScheduler>,
}

impl CommandLayer {
    #[must_use]
    pub fn new(scheduler: Arc<PollingScheduler>) -> Self {
        Self { scheduler }
    }

    #[must_use]
    pub fn scheduler(&self) -> &Arc<PollingScheduler> {
        &self.scheduler
    }

    #[must_use]
    pub fn welcome(&self) -> String {
        messages::WELCOME.to_string()
    }

    #[must_use]
    pub fn set_interval(&self, raw: &str) -> String {
        match self.scheduler.set_interval(raw) {
            Ok(secs) => messages::interval_set(secs),
            Err(e) => {
                tracing::info!(error = %e, "commands: rejected interval");
                messages::SET_INTERVAL_USAGE.to_string()
            }
        }
    }

    #[must_use]
    pub fn start(&self, chat_id: ChatId) -> String {
        let outcome = self.scheduler.start(chat_id);
        messages::polling_started(outcome.interval_secs)
    }

    #[must_use]
    pub fn stop(&self, chat_id: ChatId) -> String {
        match self.scheduler.stop(chat_id) {
            StopOutcome::Stopped => messages::POLLING_STOPPED.to_string(),
            StopOutcome::NothingToStop => messages::NOTHING_TO_STOP.to_string(),
        }
    }
}
