//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    if std::path::Path::new("questions.csv").exists() {
        println!("questions.csv already exists, skipping.");
    } else {
        std::fs::write("questions.csv", SAMPLE_BANK)?;
        println!("Created questions.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizdeck.toml with your sheet id and subjects");
    println!("  2. Run: quizdeck validate --file questions.csv");
    println!("  3. Run: quizdeck run --subject anatomy");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Identifier of the remote sheet document.
sheet_id = "quizdeck-demo"

# Uncomment to point at a different export service.
# base_url = "https://quizdeck-sheets.workers.dev"

max_attempts = 3
retry_delay_ms = 1000
state_path = "./quizdeck-state.json"

[subjects]
anatomy = "Anatomy"
physiology = "Physiology"
pharmacology = "Pharmacology"
"#;

const SAMPLE_BANK: &str = "\
Question,Choice A,Choice B,Choice C,Choice D,Choice E,Answer,Explanation
Which bone is the longest in the human body?,Femur,Tibia,Humerus,,,A,The femur runs from hip to knee.
\"Which organ produces insulin?\",Liver,Pancreas,Spleen,Kidney,,B,Beta cells of the pancreatic islets secrete insulin.
How many chambers does the heart have?,Two,Three,Four,Five,,C,
";
