//! Deal records extracted from listing pages and the chat they are sent to.

use serde::{Deserialize, Serialize};

/// Placeholder for a product name or price that could not be read.
pub const NOT_AVAILABLE: &str = "N/D";
/// Discount label used when a card carries no discount badge.
pub const NO_DISCOUNT: &str = "0%";
/// Remaining duration used when a card has no timer.
pub const UNKNOWN_DURATION: &str = "sconosciuta";
/// Link placeholder for cards without a resolvable anchor.
pub const LINK_UNAVAILABLE: &str = "Link non disponibile";

/// One promoted product as shown on a deals page.
///
/// Every field is always populated: values the markup does not provide are
/// replaced by the sentinels above, so formatting never has to branch on
/// absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub product_name: String,
    /// Raw price text; kept as text because the source mixes currency
    /// symbols and partial formatting.
    pub price: String,
    pub discount_label: String,
    /// Opaque duration tag copied from the page.
    pub remaining_duration: String,
    /// Absolute URL, or [`LINK_UNAVAILABLE`].
    pub link: String,
}

impl Default for DealRecord {
    fn default() -> Self {
        Self {
            product_name: NOT_AVAILABLE.to_string(),
            price: NOT_AVAILABLE.to_string(),
            discount_label: NO_DISCOUNT.to_string(),
            remaining_duration: UNKNOWN_DURATION.to_string(),
            link: LINK_UNAVAILABLE.to_string(),
        }
    }
}

/// Destination chat for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
