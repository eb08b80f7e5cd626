use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// HTTP client that downloads raw deals-page markup.
///
/// Every request carries the same browser `User-Agent`. Non-2xx responses
/// and transport failures are returned as typed errors; nothing is retried
/// here.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with a per-request timeout and fixed `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Fetches one page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`] — any non-2xx status.
    /// - [`FetchError::Http`] — network, TLS, timeout, or body decoding failure.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let http_err = |source| FetchError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        tracing::debug!(url, bytes = body.len(), "scraper: fetched page");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
