//! Application configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fetcher::RetryPolicy;

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Identifier of the remote sheet document.
    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
    /// Override for the sheet-export service base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Subject label → partition (sheet tab) name.
    #[serde(default = "default_subjects")]
    pub subjects: HashMap<String, String>,
    /// Fetch attempts before giving up.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
    /// Base backoff between attempts in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Where the key-value state file lives.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

fn default_sheet_id() -> String {
    "quizdeck-demo".to_string()
}

fn default_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./quizdeck-state.json")
}

fn default_subjects() -> HashMap<String, String> {
    [
        ("anatomy", "Anatomy"),
        ("physiology", "Physiology"),
        ("pharmacology", "Pharmacology"),
        ("pathology", "Pathology"),
        ("microbiology", "Microbiology"),
        ("parasitology", "Parasitology"),
        ("surgery", "Surgery"),
        ("medicine", "Medicine"),
        ("public-health", "Public Health"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            sheet_id: default_sheet_id(),
            base_url: None,
            subjects: default_subjects(),
            max_attempts: default_attempts(),
            retry_delay_ms: default_retry_delay(),
            state_path: default_state_path(),
        }
    }
}

impl QuizConfig {
    /// The retry policy this configuration describes.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Resolve a subject label to its partition name.
    pub fn partition_for(&self, subject: &str) -> Option<&str> {
        self.subjects.get(subject).map(String::as_str)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// The `QUIZDECK_SHEET_ID` environment variable overrides the sheet id.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(id) = std::env::var("QUIZDECK_SHEET_ID") {
        config.sheet_id = id;
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
