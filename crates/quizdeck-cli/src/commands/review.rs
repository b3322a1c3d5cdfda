//! The `quizdeck review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_fetch::load_config_from;
use quizdeck_store::StateStore;

use super::format_time;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = StateStore::new(&config.state_path);

    let Some(summary) = store.load_summary() else {
        println!("No saved quiz results found.");
        return Ok(());
    };

    println!("Quiz review: {}", summary.subject);
    println!(
        "Score {}/{} ({}%), time taken {}, finished {}",
        summary.score,
        summary.total_questions,
        summary.accuracy(),
        format_time(summary.time_taken_secs),
        summary.finished_at.format("%Y-%m-%d %H:%M UTC")
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);
    for (i, record) in summary.answered.iter().enumerate() {
        let mark = if record.is_correct { "ok" } else { "X" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&record.question_text),
            Cell::new(&record.selected_choice_text),
            Cell::new(&record.correct_choice_text),
            Cell::new(mark),
        ]);
    }
    println!("{table}");

    for (i, record) in summary.answered.iter().enumerate() {
        if let Some(explanation) = &record.explanation {
            if !record.is_correct {
                println!("{}. {}", i + 1, explanation);
            }
        }
    }

    let answered = summary.answered.len() as u32;
    if answered < summary.total_questions {
        println!(
            "{} of {} questions went unanswered.",
            summary.total_questions - answered,
            summary.total_questions
        );
    }

    Ok(())
}
