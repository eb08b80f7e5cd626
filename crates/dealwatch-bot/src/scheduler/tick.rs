//! One fetch-extract-notify cycle.

use dealwatch_core::ChatId;
use dealwatch_scraper::{DealSource, FetchError};
use thiserror::Error;

use crate::messages;
use crate::notifier::{DeliveryError, NotificationSink};

#[derive(Debug, Error)]
pub enum TickFailure {
    #[error("deal collection failed: {0}")]
    Source(#[from] FetchError),

    #[error("message delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Runs one tick for `chat_id`.
///
/// Sends one message per deal in collection order, or a single "no deals"
/// message. Any failure is logged and reported to the chat with one generic
/// notice; it never propagates to the job.
pub async fn run_tick(chat_id: ChatId, source: &dyn DealSource, sink: &dyn NotificationSink) {
    match deliver_deals(chat_id, source, sink).await {
        Ok(sent) => {
            tracing::info!(%chat_id, sent, "scheduler: tick complete");
        }
        Err(e) => {
            tracing::error!(%chat_id, error = %e, "scheduler: tick failed");
            if let Err(notice_err) = sink.send(chat_id, messages::TICK_FAILURE).await {
                tracing::error!(
                    %chat_id,
                    error = %notice_err,
                    "scheduler: failed to deliver tick failure notice"
                );
            }
        }
    }
}

/// Returns the number of deal messages sent.
async fn deliver_deals(
    chat_id: ChatId,
    source: &dyn DealSource,
    sink: &dyn NotificationSink,
) -> Result<usize, TickFailure> {
    let deals = source.fetch_deals().await?;

    if deals.is_empty() {
        sink.send(chat_id, messages::NO_DEALS).await?;
        return Ok(0);
    }

    for deal in &deals {
        sink.send(chat_id, &messages::format_deal(deal)).await?;
    }
    Ok(deals.len())
}
