//! Completed-session summary types.
//!
//! A [`SessionSummary`] is created exactly once when a session reaches
//! its terminal state, and is the sole artifact handed to persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The record of one answered question, appended in answer order and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub question_text: String,
    pub selected_choice_text: String,
    pub correct_choice_text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// The immutable summary of one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique identifier for this session run.
    pub id: Uuid,
    /// Questions answered correctly.
    pub score: u32,
    /// Questions the session was scoped to (min of bank size and 100).
    pub total_questions: u32,
    /// Wall-clock seconds spent, budget minus remaining.
    pub time_taken_secs: u64,
    /// Per-question records, in answer order. May be shorter than
    /// `total_questions` when the time budget expired first.
    pub answered: Vec<AnsweredRecord>,
    /// Subject label the session was started with.
    pub subject: String,
    /// When the session finished.
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Score as a percentage of the session scope, rounded to one
    /// decimal place (2 of 3 → 66.7).
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        let pct = f64::from(self.score) / f64::from(self.total_questions) * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u32, total: u32) -> SessionSummary {
        SessionSummary {
            id: Uuid::nil(),
            score,
            total_questions: total,
            time_taken_secs: 90,
            answered: vec![],
            subject: "anatomy".into(),
            finished_at: "2026-01-02T03:04:05Z".parse().unwrap(),
        }
    }

    #[test]
    fn accuracy_rounds_to_one_decimal() {
        assert_eq!(summary(2, 3).accuracy(), 66.7);
        assert_eq!(summary(1, 3).accuracy(), 33.3);
        assert_eq!(summary(3, 3).accuracy(), 100.0);
        assert_eq!(summary(0, 3).accuracy(), 0.0);
    }

    #[test]
    fn summary_serde_roundtrip() {
        let s = SessionSummary {
            answered: vec![AnsweredRecord {
                question_text: "Q".into(),
                selected_choice_text: "a".into(),
                correct_choice_text: "b".into(),
                is_correct: false,
                explanation: None,
            }],
            ..summary(0, 1)
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn timestamp_serializes_as_iso8601() {
        let json = serde_json::to_string(&summary(1, 2)).unwrap();
        assert!(json.contains("2026-01-02T03:04:05Z"));
    }
}
