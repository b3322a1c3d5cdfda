//! Bounded retry around a question source.
//!
//! The retry policy is a first-class value rather than inline control
//! flow: attempt count and backoff live in [`RetryPolicy`], and
//! [`ResilientFetcher`] applies it around any [`QuestionSource`].

use std::time::Duration;

use anyhow::Context;

use quizdeck_core::{parse_bank, FetchError, QuestionBank};

use crate::source::QuestionSource;

/// How often and how patiently to retry a failed attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Base backoff; attempt `n`'s failure waits `base_delay × n`
    /// (linear: 1s, 2s, 3s, …).
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait after the `attempt`-th failure (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Fetches, parses, and validates a question bank with bounded retry.
///
/// Every failure mode of one attempt — network error, bad status, a
/// body without a single comma, or a bank that parses to zero valid
/// questions — burns an attempt and is retried after the policy's
/// backoff. The parsed-but-empty case is retried deliberately: the most
/// likely cause is transient upstream misconfiguration.
///
/// Cancellation: the future returned by [`fetch_bank`] owns its request
/// and backoff timers, so dropping it (e.g. the caller navigated away)
/// aborts the in-flight attempt and guarantees no late retry fires.
///
/// [`fetch_bank`]: ResilientFetcher::fetch_bank
pub struct ResilientFetcher<S> {
    source: S,
    policy: RetryPolicy,
}

impl<S: QuestionSource> ResilientFetcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, RetryPolicy::default())
    }

    pub fn with_policy(source: S, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Retrieve the bank for a partition, retrying per the policy.
    /// Returns on the first attempt that yields a non-empty bank; after
    /// exhaustion, fails with one aggregated error carrying the last
    /// cause (individual failures are logged, not surfaced).
    pub async fn fetch_bank(&self, partition: &str) -> anyhow::Result<QuestionBank> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.delay_after(attempt - 1)).await;
            }

            match self.attempt(partition).await {
                Ok(bank) => {
                    tracing::info!(
                        source = self.source.name(),
                        partition,
                        questions = bank.len(),
                        attempt,
                        "question bank loaded"
                    );
                    return Ok(bank);
                }
                Err(e) => {
                    tracing::warn!(
                        source = self.source.name(),
                        partition,
                        attempt,
                        max_attempts,
                        "fetch attempt failed: {e}"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.expect("at least one attempt always runs")).with_context(|| {
            format!("failed to load question bank for '{partition}' after {max_attempts} attempts")
        })
    }

    async fn attempt(&self, partition: &str) -> Result<QuestionBank, FetchError> {
        let body = self.source.fetch_raw(partition).await?;
        // Cheap sanity check that the body looks tabular rather than an
        // error page.
        if !body.contains(',') {
            return Err(FetchError::NonTabular);
        }
        let bank = parse_bank(&body);
        if bank.is_empty() {
            return Err(FetchError::EmptyBank);
        }
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;

    const VALID_CSV: &str = "Question,A,B,C,D,E,Answer,Explanation\n\
                             Q1,a,b,,,,A,why\n\
                             Q2,x,y,z,,,C,\n";
    const HEADER_ONLY_CSV: &str = "Question,A,B,C,D,E,Answer,Explanation\n";

    fn fetcher(source: MockSource) -> ResilientFetcher<MockSource> {
        ResilientFetcher::new(source)
    }

    #[tokio::test]
    async fn first_good_response_never_retries() {
        let f = fetcher(MockSource::always(VALID_CSV));
        let bank = f.fetch_bank("Anatomy").await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(f.source.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_is_retried_then_succeeds() {
        let f = fetcher(MockSource::with_responses(vec![
            Err(FetchError::HttpStatus(500)),
            Ok(VALID_CSV.into()),
        ]));
        let bank = f.fetch_bank("Anatomy").await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(f.source.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn non_tabular_body_is_retried() {
        let f = fetcher(MockSource::with_responses(vec![
            Ok("<html>service error</html>".into()),
            Ok(VALID_CSV.into()),
        ]));
        let bank = f.fetch_bank("Anatomy").await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(f.source.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_bank_is_retried_like_a_failure() {
        // A successful response with zero valid questions must not
        // short-circuit the retry sequence.
        let f = fetcher(MockSource::with_responses(vec![
            Ok(HEADER_ONLY_CSV.into()),
            Ok(VALID_CSV.into()),
        ]));
        let bank = f.fetch_bank("Anatomy").await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(f.source.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_aggregates_the_last_cause() {
        let f = fetcher(MockSource::with_responses(vec![
            Err(FetchError::HttpStatus(500)),
            Err(FetchError::HttpStatus(502)),
            Err(FetchError::HttpStatus(503)),
        ]));
        let err = f.fetch_bank("Anatomy").await.unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("after 3 attempts"), "got: {rendered}");
        assert!(rendered.contains("HTTP 503"), "got: {rendered}");
        assert_eq!(f.source.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_is_linear() {
        let start = tokio::time::Instant::now();
        let f = fetcher(MockSource::with_responses(vec![
            Err(FetchError::HttpStatus(500)),
            Err(FetchError::HttpStatus(500)),
            Err(FetchError::HttpStatus(500)),
        ]));
        let _ = f.fetch_bank("Anatomy").await;
        // 1s after the first failure, 2s after the second.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_policy_never_sleeps() {
        let start = tokio::time::Instant::now();
        let f = ResilientFetcher::with_policy(
            MockSource::with_responses(vec![Err(FetchError::NonTabular)]),
            RetryPolicy {
                max_attempts: 1,
                ..Default::default()
            },
        );
        assert!(f.fetch_bank("Anatomy").await.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(f.source.call_count(), 1);
    }
}
