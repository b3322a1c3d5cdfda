//! The `quizdeck subjects` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_fetch::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut subjects: Vec<_> = config.subjects.iter().collect();
    subjects.sort();

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Partition"]);
    for (subject, partition) in subjects {
        table.add_row(vec![Cell::new(subject), Cell::new(partition)]);
    }

    println!("{table}");
    println!("Start one with: quizdeck run --subject <name>");
    Ok(())
}
