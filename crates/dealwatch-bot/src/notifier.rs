//! Outbound chat messages.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dealwatch_core::ChatId;
use teloxide::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Failure of a sink that is not the Telegram API, such as a closed
    /// output stream.
    #[error("delivery to chat {chat_id} failed: {reason}")]
    Transport { chat_id: ChatId, reason: String },
}

/// Sends a text message to a chat.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the transport rejects or fails to send.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError>;
}

/// [`NotificationSink`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(teloxide::types::ChatId(chat_id.0), text)
            .await?;
        Ok(())
    }
}

/// [`NotificationSink`] that writes each message to a local stream, followed
/// by a blank line. Backs `dealwatch scan`.
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl ConsoleSink<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<W: Write + Send> NotificationSink for ConsoleSink<W> {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{text}\n")
            .and_then(|()| out.flush())
            .map_err(|e| DeliveryError::Transport {
                chat_id,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "notifier_test.rs"]
mod tests;
