//! Scripted source for testing the fetcher without real network calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdeck_core::FetchError;

use crate::source::QuestionSource;

/// A [`QuestionSource`] that replays a scripted sequence of outcomes,
/// one per call, and counts how often it was hit.
pub struct MockSource {
    responses: Mutex<VecDeque<Result<String, FetchError>>>,
    call_count: AtomicU32,
    last_partition: Mutex<Option<String>>,
}

impl MockSource {
    /// Replay the given outcomes in order; further calls fail.
    pub fn with_responses(responses: Vec<Result<String, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            call_count: AtomicU32::new(0),
            last_partition: Mutex::new(None),
        }
    }

    /// Always answer with the same body.
    pub fn always(body: &str) -> Self {
        Self::with_responses(vec![Ok(body.to_string())])
    }

    /// Number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Partition of the most recent call.
    pub fn last_partition(&self) -> Option<String> {
        self.last_partition.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_raw(&self, partition: &str) -> Result<String, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_partition.lock().unwrap() = Some(partition.to_string());

        let mut responses = self.responses.lock().unwrap();
        // A final successful body keeps replaying; errors are one-shot.
        if responses.len() == 1 {
            if let Some(Ok(body)) = responses.front() {
                return Ok(body.clone());
            }
        }
        responses
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("mock script exhausted".into())))
    }
}
