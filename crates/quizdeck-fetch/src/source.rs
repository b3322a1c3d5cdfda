//! The transport seam between the fetcher and the remote tabular service.

use async_trait::async_trait;

use quizdeck_core::FetchError;

/// A backend that can retrieve the raw comma-separated text for one
/// partition (subject) of the question source.
///
/// Implementations do transport only — no parsing, no retry. The
/// [`ResilientFetcher`](crate::ResilientFetcher) layers policy on top.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "sheet").
    fn name(&self) -> &str;

    /// Fetch the raw body for a partition.
    async fn fetch_raw(&self, partition: &str) -> Result<String, FetchError>;
}
