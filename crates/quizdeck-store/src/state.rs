//! JSON-file key-value store.
//!
//! A small client-local store shared with presentation collaborators:
//! quizdeck owns the subject/partition selection keys and the
//! single-slot result summary; foreign keys (the theme collaborator's
//! `darkMode`) pass through a save untouched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use quizdeck_core::SessionSummary;

const KEY_SUBJECT: &str = "selectedSubject";
const KEY_PARTITION: &str = "sheetName";
const KEY_RESULTS: &str = "quizResults";

/// Key-value persistence backed by one JSON object file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the single persisted summary slot.
    pub fn save_summary(&self, summary: &SessionSummary) -> Result<()> {
        let value = serde_json::to_value(summary).context("failed to serialize summary")?;
        self.put(KEY_RESULTS, value)
    }

    /// The last saved summary. A missing file, missing key, or a value
    /// that no longer deserializes all read as "no summary available".
    pub fn load_summary(&self) -> Option<SessionSummary> {
        let value = self.read_map().remove(KEY_RESULTS)?;
        match serde_json::from_value(value) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("discarding unreadable stored summary: {e}");
                None
            }
        }
    }

    /// Remember the subject/partition the learner picked.
    pub fn save_selection(&self, subject: &str, partition: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(KEY_SUBJECT.into(), Value::String(subject.to_string()));
        map.insert(KEY_PARTITION.into(), Value::String(partition.to_string()));
        self.write_map(map)
    }

    pub fn selected_subject(&self) -> Option<String> {
        self.get_string(KEY_SUBJECT)
    }

    pub fn partition(&self) -> Option<String> {
        self.get_string(KEY_PARTITION)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.read_map().remove(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value);
        self.write_map(map)
    }

    /// The whole store as a map; missing or corrupt files read as empty
    /// (never fatal).
    fn read_map(&self) -> Map<String, Value> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!("state file {} is not a JSON object, starting fresh", self.path.display());
                Map::new()
            }
        }
    }

    fn write_map(&self, map: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write state to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::AnsweredRecord;
    use uuid::Uuid;

    fn sample_summary() -> SessionSummary {
        SessionSummary {
            id: Uuid::nil(),
            score: 2,
            total_questions: 3,
            time_taken_secs: 140,
            answered: vec![AnsweredRecord {
                question_text: "Q1".into(),
                selected_choice_text: "a".into(),
                correct_choice_text: "a".into(),
                is_correct: true,
                explanation: None,
            }],
            subject: "anatomy".into(),
            finished_at: "2026-01-02T03:04:05Z".parse().unwrap(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> StateStore {
        StateStore::new(dir.path().join("state.json"))
    }

    #[test]
    fn summary_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_summary(&sample_summary()).unwrap();
        let loaded = store.load_summary().unwrap();
        assert_eq!(loaded, sample_summary());
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load_summary().is_none());
        assert!(store.selected_subject().is_none());
    }

    #[test]
    fn corrupt_file_reads_as_absent_and_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load_summary().is_none());
        store.save_summary(&sample_summary()).unwrap();
        assert!(store.load_summary().is_some());
    }

    #[test]
    fn corrupt_summary_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"quizResults": {"score": "not a number"}}"#).unwrap();
        assert!(store.load_summary().is_none());
    }

    #[test]
    fn save_overwrites_the_single_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_summary(&sample_summary()).unwrap();
        let second = SessionSummary {
            score: 3,
            ..sample_summary()
        };
        store.save_summary(&second).unwrap();

        assert_eq!(store.load_summary().unwrap().score, 3);
    }

    #[test]
    fn foreign_keys_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"darkMode": "true"}"#).unwrap();

        store.save_summary(&sample_summary()).unwrap();
        store.save_selection("anatomy", "Anatomy").unwrap();

        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["darkMode"], "true");
    }

    #[test]
    fn selection_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_selection("surgery", "Surgery").unwrap();
        assert_eq!(store.selected_subject().as_deref(), Some("surgery"));
        assert_eq!(store.partition().as_deref(), Some("Surgery"));
    }
}
