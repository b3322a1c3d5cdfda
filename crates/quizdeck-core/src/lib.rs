//! quizdeck-core — question model, CSV ingestion, and the session state machine.
//!
//! This crate holds the pure, synchronous heart of quizdeck: parsing
//! delimited text into records, building validated questions, and
//! driving one timed quiz session to its summary. No I/O happens here.

pub mod bank;
pub mod error;
pub mod model;
pub mod record;
pub mod session;
pub mod summary;

pub use bank::{build_bank, parse_bank};
pub use error::{FetchError, SessionError};
pub use model::{Choice, Question, QuestionBank};
pub use record::{parse_records, RawRecord};
pub use session::{Advance, QuestionCard, QuizSession, Tick, Verdict};
pub use summary::{AnsweredRecord, SessionSummary};
