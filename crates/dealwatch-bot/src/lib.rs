//! Telegram deal notifier: per-chat polling scheduler and its chat front end.

pub mod commands;
pub mod messages;
pub mod notifier;
pub mod scheduler;
pub mod telegram;

pub use commands::CommandLayer;
pub use notifier::{ConsoleSink, DeliveryError, NotificationSink, TelegramSink};
pub use scheduler::{
    JobSnapshot, JobState, PollingScheduler, SchedulerError, StartOutcome, StopOutcome,
};
