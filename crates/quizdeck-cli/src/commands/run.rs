//! The `quizdeck run` command: fetch, quiz, persist.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use quizdeck_core::{Advance, QuestionCard, QuizSession, SessionSummary, Tick};
use quizdeck_fetch::{load_config_from, ResilientFetcher, SheetSource};
use quizdeck_store::StateStore;

use super::format_time;

pub async fn execute(
    subject: Option<String>,
    partition: Option<String>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = StateStore::new(&config.state_path);

    let subject = subject
        .or_else(|| store.selected_subject())
        .context("no subject selected; pass --subject or see `quizdeck subjects`")?;
    let partition = partition
        .or_else(|| config.partition_for(&subject).map(str::to_string))
        .or_else(|| store.partition())
        .with_context(|| format!("no partition configured for subject '{subject}'"))?;
    store.save_selection(&subject, &partition)?;

    eprintln!("Loading {subject} questions...");
    let source = SheetSource::new(&config.sheet_id, config.base_url.clone());
    let fetcher = ResilientFetcher::with_policy(source, config.retry_policy());
    let bank = match fetcher.fetch_bank(&partition).await {
        Ok(bank) => bank,
        Err(e) => {
            tracing::error!("question load failed: {e:#}");
            anyhow::bail!("Failed to load questions. Please try again later.");
        }
    };

    let session = match seed {
        Some(seed) => QuizSession::start_with_rng(bank, &subject, StdRng::seed_from_u64(seed)),
        None => QuizSession::start(bank, &subject),
    }?;

    println!(
        "\n{} quiz — {} questions, {} on the clock.",
        subject,
        session.total_questions(),
        format_time(session.remaining_secs())
    );
    println!("Pick a choice (1-5 or a-e), press Enter to submit, Enter again to continue.\n");

    let summary = drive(session).await?;
    print_summary(&summary);
    store.save_summary(&summary)?;
    println!("Results saved — see them again with `quizdeck review`.");
    Ok(())
}

/// Drive the session from one task: a 1-second interval delivers ticks
/// and stdin lines deliver select/submit/advance. Both arms run on the
/// same select loop, so a tick can never interleave with a transition.
async fn drive(mut session: QuizSession) -> Result<SessionSummary> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval fires immediately; swallow it
    // so the budget starts draining one second from now.
    interval.tick().await;

    print_card(&session.card().expect("session just started"));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match session.tick() {
                    Some(Tick::Remaining(secs)) => {
                        if secs > 0 && secs % 60 == 0 {
                            eprintln!("  [{} remaining]", format_time(secs));
                        }
                    }
                    Some(Tick::Expired(summary)) => {
                        println!("\nTime's up!");
                        return Ok(summary);
                    }
                    None => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    anyhow::bail!("input closed before the quiz finished");
                };
                if let Some(summary) = handle_input(&mut session, line.trim()) {
                    return Ok(summary);
                }
            }
        }
    }
}

/// One dispatch point for the three external inputs. A blank line means
/// "submit" while a choice is selected and "continue" once submitted —
/// the sub-state decides, not a swapped handler.
fn handle_input(session: &mut QuizSession, input: &str) -> Option<SessionSummary> {
    if !input.is_empty() {
        let selected = parse_choice(input).filter(|&i| session.select(i));
        match (selected, session.card()) {
            (Some(index), Some(card)) => println!("Selected: {}", card.choices[index]),
            (None, Some(card)) => {
                println!("Pick a choice between 1 and {}.", card.choices.len());
            }
            (_, None) => {}
        }
        return None;
    }

    if let Some(verdict) = session.submit() {
        if verdict.is_correct {
            println!("Correct!");
        } else {
            println!(
                "Incorrect. The correct answer is: {}",
                verdict.correct_choice_text
            );
        }
        if let Some(explanation) = &verdict.explanation {
            println!("  {explanation}");
        }
        println!("(Enter to continue)");
        return None;
    }

    match session.advance() {
        Some(Advance::Next(card)) => {
            print_card(&card);
            None
        }
        Some(Advance::Finished(summary)) => Some(summary),
        // Awaiting selection: a blank line does nothing yet.
        None => {
            println!("Pick a choice first.");
            None
        }
    }
}

/// Accept `1`-`5` or `a`-`e` (any case) as a choice index.
fn parse_choice(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match ch {
        '1'..='5' => Some(ch as usize - '1' as usize),
        'a'..='e' => Some(ch as usize - 'a' as usize),
        'A'..='E' => Some(ch as usize - 'A' as usize),
        _ => None,
    }
}

fn print_card(card: &QuestionCard) {
    println!(
        "\nQuestion {}/{}  (score {}, {} left)",
        card.number,
        card.total,
        card.score,
        format_time(card.remaining_secs)
    );
    println!("{}", card.text);
    for (i, choice) in card.choices.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        println!("  {letter}) {choice}");
    }
}

fn print_summary(summary: &SessionSummary) {
    println!("\nQuiz complete: {}", summary.subject);
    println!(
        "  Score: {}/{} ({}%)",
        summary.score,
        summary.total_questions,
        summary.accuracy()
    );
    println!("  Time taken: {}", format_time(summary.time_taken_secs));
    if (summary.answered.len() as u32) < summary.total_questions {
        println!(
            "  Answered {} of {} before the clock ran out.",
            summary.answered.len(),
            summary.total_questions
        );
    }
}
