//! Question bank builder.
//!
//! Turns parsed row records into validated [`Question`]s, dropping
//! malformed rows. Row shape: field 0 is the question text, fields 1–5
//! hold up to five choice texts (empty fields skipped), field 6 is a
//! single letter naming the correct choice by position (`A` → choice 0),
//! field 7 is an optional explanation.

use crate::model::{Choice, Question, QuestionBank};
use crate::record::{parse_records, RawRecord};

/// Minimum fields a data row must carry to be considered at all.
const MIN_FIELDS: usize = 8;

/// Strip surrounding quote characters, then surrounding whitespace.
fn clean_field(field: &str) -> &str {
    field.trim_matches('"').trim()
}

/// Build one question from a data row, or `None` if the row is malformed.
fn build_question(row: &RawRecord) -> Option<Question> {
    if row.len() < MIN_FIELDS {
        return None;
    }

    let text = clean_field(&row[0]);
    let letter = clean_field(&row[6]);
    if text.is_empty() || letter.is_empty() {
        return None;
    }

    let mut choices: Vec<Choice> = row[1..=5]
        .iter()
        .map(|f| clean_field(f))
        .filter(|t| !t.is_empty())
        .map(|t| Choice {
            text: t.to_string(),
            correct: false,
        })
        .collect();
    if choices.len() < 2 {
        return None;
    }

    let index = (letter.to_uppercase().as_bytes()[0] as i32) - ('A' as i32);
    let index = usize::try_from(index).ok()?;
    let choice = choices.get_mut(index)?;
    choice.correct = true;

    let explanation = Some(clean_field(&row[7]))
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Some(Question {
        text: text.to_string(),
        choices,
        explanation,
    })
}

/// Build questions from data rows (row 0, the header, already skipped by
/// the caller). Output order matches input order; malformed rows emit
/// nothing and are logged.
pub fn build_bank(rows: &[RawRecord]) -> QuestionBank {
    let mut questions = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match build_question(row) {
            Some(q) => questions.push(q),
            None => {
                tracing::warn!("dropping malformed question row {}", i + 2);
            }
        }
    }
    QuestionBank::new(questions)
}

/// One-call ingestion entry: parse raw CSV text, skip the header row,
/// and build the bank.
pub fn parse_bank(csv: &str) -> QuestionBank {
    let rows = parse_records(csv);
    build_bank(rows.get(1..).unwrap_or_default())
}
