//! quizdeck-fetch — resilient remote question-bank ingestion.
//!
//! Defines the [`QuestionSource`] transport seam, the HTTP
//! [`SheetSource`], a scripted [`MockSource`] for tests, and the
//! [`ResilientFetcher`] that wraps any source in a bounded, cancellable
//! retry policy.

pub mod config;
pub mod fetcher;
pub mod mock;
pub mod sheet;
pub mod source;

pub use config::{load_config, load_config_from, QuizConfig};
pub use fetcher::{ResilientFetcher, RetryPolicy};
pub use mock::MockSource;
pub use sheet::SheetSource;
pub use source::QuestionSource;
