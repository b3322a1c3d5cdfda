//! Quiz session state machine.
//!
//! A [`QuizSession`] is an owned value driving one timed run through a
//! question bank: shuffled question order, one question at a time, a
//! per-question `AwaitingSelection → Selected → Submitted` sub-state,
//! score and time tracking, and an idempotent terminal summary.
//!
//! The session never touches presentation. It emits plain data — a
//! [`QuestionCard`] per question, a [`Verdict`] per submission, the
//! remaining seconds per tick, a [`SessionSummary`] at the end — and
//! accepts exactly three external inputs: select, submit, advance.
//! Invalid transitions are no-ops, never errors.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{Question, QuestionBank};
use crate::summary::{AnsweredRecord, SessionSummary};

/// Time budget granted per question, in seconds.
pub const SECS_PER_QUESTION: u64 = 72;

/// Hard cap on questions per session.
pub const MAX_QUESTIONS: usize = 100;

/// Per-question sub-state. An answer cannot be changed once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerState {
    AwaitingSelection,
    /// Holds the display index of the highlighted choice.
    Selected(usize),
    Submitted,
}

/// Presentation payload for the question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    /// 1-based position within the session.
    pub number: usize,
    /// Session scope (min of bank size and [`MAX_QUESTIONS`]).
    pub total: usize,
    pub text: String,
    /// Choice texts in freshly shuffled display order.
    pub choices: Vec<String>,
    pub score: u32,
    pub remaining_secs: u64,
}

/// What the session emits when an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub correct_choice_text: String,
    pub explanation: Option<String>,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone)]
pub enum Advance {
    /// The next question, sub-state reset to awaiting-selection.
    Next(QuestionCard),
    /// No questions remain; the session is complete.
    Finished(SessionSummary),
}

/// Outcome of [`QuizSession::tick`].
#[derive(Debug, Clone)]
pub enum Tick {
    Remaining(u64),
    /// The budget hit zero while a question was still unanswered.
    Expired(SessionSummary),
}

/// One timed run through a (subset of a) question bank.
///
/// Constructed via [`QuizSession::start`]; an un-started session is not
/// representable. Completion is terminal and idempotent.
#[derive(Debug)]
pub struct QuizSession {
    /// Shuffled questions; only the first `total` are ever presented.
    questions: Vec<Question>,
    subject: String,
    total: usize,
    current: usize,
    answer_state: AnswerState,
    /// Display index → choice index for the current question.
    display_order: Vec<usize>,
    score: u32,
    answered: Vec<AnsweredRecord>,
    total_time: u64,
    remaining: u64,
    rng: StdRng,
    /// Cached terminal summary; `Some` means Completed.
    outcome: Option<SessionSummary>,
}

impl QuizSession {
    /// Start a session: shuffle the bank (uniform permutation), scope it
    /// to at most [`MAX_QUESTIONS`], and present question 0.
    pub fn start(bank: QuestionBank, subject: impl Into<String>) -> Result<Self, SessionError> {
        Self::start_with_rng(bank, subject, StdRng::from_entropy())
    }

    /// Like [`QuizSession::start`] with a caller-supplied RNG, so tests
    /// can pin the permutations.
    pub fn start_with_rng(
        bank: QuestionBank,
        subject: impl Into<String>,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        let mut questions = bank.into_questions();
        questions.shuffle(&mut rng);

        let total = questions.len().min(MAX_QUESTIONS);
        let total_time = SECS_PER_QUESTION * total as u64;

        let mut session = Self {
            questions,
            subject: subject.into(),
            total,
            current: 0,
            answer_state: AnswerState::AwaitingSelection,
            display_order: Vec::new(),
            score: 0,
            answered: Vec::new(),
            total_time,
            remaining: total_time,
            rng,
            outcome: None,
        };
        session.reshuffle_choices();
        Ok(session)
    }

    /// Questions answered correctly so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left in the budget.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn total_questions(&self) -> usize {
        self.total
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn answered(&self) -> &[AnsweredRecord] {
        &self.answered
    }

    pub fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }

    /// The terminal summary, once the session has completed.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.outcome.as_ref()
    }

    /// The current question as a presentation payload, or `None` once
    /// the session has completed.
    pub fn card(&self) -> Option<QuestionCard> {
        if self.is_completed() {
            return None;
        }
        let question = &self.questions[self.current];
        Some(QuestionCard {
            number: self.current + 1,
            total: self.total,
            text: question.text.clone(),
            choices: self
                .display_order
                .iter()
                .map(|&i| question.choices[i].text.clone())
                .collect(),
            score: self.score,
            remaining_secs: self.remaining,
        })
    }

    /// Record the highlighted choice by display index. Re-selection is
    /// allowed until submission; afterwards this is a no-op. Returns
    /// whether the selection was recorded.
    pub fn select(&mut self, display_index: usize) -> bool {
        if self.is_completed()
            || self.answer_state == AnswerState::Submitted
            || display_index >= self.display_order.len()
        {
            return false;
        }
        self.answer_state = AnswerState::Selected(display_index);
        true
    }

    /// Submit the selected choice: judge it, update the score, append
    /// the answer record, and lock the question. No-op (`None`) unless a
    /// choice is currently selected.
    pub fn submit(&mut self) -> Option<Verdict> {
        if self.is_completed() {
            return None;
        }
        let AnswerState::Selected(display_index) = self.answer_state else {
            return None;
        };

        let question = &self.questions[self.current];
        let selected = &question.choices[self.display_order[display_index]];
        let correct = question.correct_choice();
        let is_correct = selected.correct;
        if is_correct {
            self.score += 1;
        }

        self.answered.push(AnsweredRecord {
            question_text: question.text.clone(),
            selected_choice_text: selected.text.clone(),
            correct_choice_text: correct.text.clone(),
            is_correct,
            explanation: question.explanation.clone(),
        });
        self.answer_state = AnswerState::Submitted;

        Some(Verdict {
            is_correct,
            correct_choice_text: correct.text.clone(),
            explanation: question.explanation.clone(),
        })
    }

    /// Move past a submitted question: present the next one with a
    /// fresh choice shuffle, or complete the session when none remain.
    /// No-op (`None`) unless the current question was submitted.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.is_completed() || self.answer_state != AnswerState::Submitted {
            return None;
        }

        if self.current + 1 < self.total {
            self.current += 1;
            self.answer_state = AnswerState::AwaitingSelection;
            self.reshuffle_choices();
            Some(Advance::Next(self.card().expect("session is in progress")))
        } else {
            Some(Advance::Finished(self.complete()))
        }
    }

    /// Burn one second of the budget. At zero the session is forced to
    /// complete — except while the current question sits in the
    /// Submitted sub-state, where completion is left to [`advance`] so a
    /// just-recorded final answer terminates normally rather than by
    /// timeout. Returns `None` once the session has completed.
    ///
    /// [`advance`]: QuizSession::advance
    pub fn tick(&mut self) -> Option<Tick> {
        if self.is_completed() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 && self.answer_state != AnswerState::Submitted {
            return Some(Tick::Expired(self.complete()));
        }
        Some(Tick::Remaining(self.remaining))
    }

    /// Finalize score and timing. Idempotent: the summary is built once
    /// and cached, so repeated completion yields the identical value.
    fn complete(&mut self) -> SessionSummary {
        if let Some(summary) = &self.outcome {
            return summary.clone();
        }
        let summary = SessionSummary {
            id: Uuid::new_v4(),
            score: self.score,
            total_questions: self.total as u32,
            time_taken_secs: self.total_time - self.remaining,
            answered: self.answered.clone(),
            subject: self.subject.clone(),
            finished_at: Utc::now(),
        };
        self.outcome = Some(summary.clone());
        summary
    }

    /// New display order for the current question's choices. Each
    /// question is independently shuffled every time it is shown.
    fn reshuffle_choices(&mut self) {
        let n = self.questions[self.current].choices.len();
        self.display_order = (0..n).collect();
        self.display_order.shuffle(&mut self.rng);
    }
}
