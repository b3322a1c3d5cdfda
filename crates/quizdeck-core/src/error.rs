//! Error taxonomy.
//!
//! Fetch-side failures are defined here in `quizdeck-core` so the
//! fetcher and its callers can classify them for retry decisions without
//! string matching.

use thiserror::Error;

/// A single ingestion attempt failure. Every variant is transient and
/// retried by the fetcher's policy; only the aggregate of an exhausted
/// retry sequence surfaces to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-success status.
    #[error("source returned HTTP {0}")]
    HttpStatus(u16),

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The body does not look like comma-separated text (likely an
    /// error page).
    #[error("response body is not tabular data")]
    NonTabular,

    /// The body parsed but yielded zero valid questions.
    #[error("question bank is empty after parsing")]
    EmptyBank,
}

/// Errors raised by session construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A session cannot start from an empty bank.
    #[error("cannot start a session from an empty question bank")]
    EmptyBank,
}
