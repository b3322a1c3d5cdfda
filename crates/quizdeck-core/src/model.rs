//! Core question model types.
//!
//! These are the fundamental types the rest of the system consumes: a
//! single answer choice, a question with its ordered choices, and the
//! read-only bank a session draws from.

use serde::{Deserialize, Serialize};

/// One answer choice for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text; non-empty after trimming quotes and whitespace.
    pub text: String,
    /// Whether this is the correct choice. Exactly one choice per
    /// question carries `true` after building.
    pub correct: bool,
}

/// A single multiple-choice question.
///
/// Immutable once built; owned by the [`QuestionBank`] for the lifetime
/// of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Ordered choices, 2 to 5 entries.
    pub choices: Vec<Choice>,
    /// Optional explanation shown after answering.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// The choice marked correct.
    pub fn correct_choice(&self) -> &Choice {
        self.choices
            .iter()
            .find(|c| c.correct)
            .expect("a built Question always has exactly one correct choice")
    }
}

/// An ordered, read-only collection of questions for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Consume the bank, yielding its questions in order.
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            text: "What is 2 + 2?".into(),
            choices: vec![
                Choice {
                    text: "3".into(),
                    correct: false,
                },
                Choice {
                    text: "4".into(),
                    correct: true,
                },
            ],
            explanation: Some("Basic arithmetic.".into()),
        }
    }

    #[test]
    fn correct_choice_lookup() {
        let q = sample_question();
        assert_eq!(q.correct_choice().text, "4");
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = sample_question();
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn explanation_defaults_to_absent() {
        let json = r#"{"text":"Q","choices":[{"text":"a","correct":true},{"text":"b","correct":false}]}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.explanation.is_none());
    }

    #[test]
    fn bank_accessors() {
        let bank = QuestionBank::new(vec![sample_question()]);
        assert_eq!(bank.len(), 1);
        assert!(!bank.is_empty());
        assert_eq!(bank.questions()[0].text, "What is 2 + 2?");
    }
}
