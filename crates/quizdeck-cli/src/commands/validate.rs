//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::{parse_bank, parse_records};

pub fn execute(file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read question file: {}", file.display()))?;

    let data_rows = parse_records(&content).len().saturating_sub(1);
    let bank = parse_bank(&content);
    let dropped = data_rows - bank.len();

    println!(
        "{}: {} data rows, {} valid questions, {} dropped",
        file.display(),
        data_rows,
        bank.len(),
        dropped
    );

    if bank.is_empty() {
        anyhow::bail!("no valid questions in {}", file.display());
    }

    println!("Question bank valid");
    Ok(())
}
