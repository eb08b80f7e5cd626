pub mod aggregate;
pub mod client;
pub mod error;
pub mod extract;

pub use aggregate::{DealAggregator, DealSource};
pub use client::PageFetcher;
pub use error::FetchError;
pub use extract::DealExtractor;
