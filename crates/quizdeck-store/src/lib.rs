//! quizdeck-store — client-local persistence.
//!
//! One small JSON key-value file holds the learner's subject selection
//! and the single-slot summary of the last completed session. Reads are
//! never fatal: anything missing or unreadable is simply absent.

pub mod state;

pub use state::StateStore;
