//! Multi-page deal collection.

use async_trait::async_trait;
use dealwatch_core::DealRecord;

use crate::client::PageFetcher;
use crate::error::FetchError;
use crate::extract::DealExtractor;

/// Anything that can produce the current batch of deals.
///
/// The scheduler depends on this seam rather than on [`DealAggregator`]
/// directly so ticks can run against canned data.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Returns the deals to announce for one tick.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the batch cannot be produced at all.
    async fn fetch_deals(&self) -> Result<Vec<DealRecord>, FetchError>;
}

/// Fetches and extracts a fixed list of deals pages.
#[derive(Clone)]
pub struct DealAggregator {
    fetcher: PageFetcher,
    extractor: DealExtractor,
    pages: Vec<String>,
}

impl DealAggregator {
    #[must_use]
    pub fn new(fetcher: PageFetcher, extractor: DealExtractor, pages: Vec<String>) -> Self {
        Self {
            fetcher,
            extractor,
            pages,
        }
    }

    /// The configured page list, in collection order.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Fetches every page in `page_urls` and concatenates their deals.
    ///
    /// Pages are processed sequentially; output is in page order, then card
    /// order. A page that fails to fetch is logged and skipped so one
    /// unreachable page does not discard the others.
    pub async fn collect(&self, page_urls: &[String]) -> Vec<DealRecord> {
        let mut all_deals = Vec::new();

        for url in page_urls {
            let markup = match self.fetcher.fetch(url).await {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "scraper: page fetch failed; skipping");
                    continue;
                }
            };

            let deals = self.extractor.extract(&markup);
            tracing::debug!(url = %url, count = deals.len(), "scraper: extracted deals");
            all_deals.extend(deals);
        }

        all_deals
    }
}

#[async_trait]
impl DealSource for DealAggregator {
    async fn fetch_deals(&self) -> Result<Vec<DealRecord>, FetchError> {
        Ok(self.collect(&self.pages).await)
    }
}
