//! The aggregate of the most recent run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_DIR;
use crate::error::{AuditError, Result};
use crate::report::ResultAggregator;

/// Persisted records of the last run, so a single check can be re-run and
/// merged without repeating the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastRun {
    /// Schema version for migration.
    pub version: u32,

    /// When the aggregate was last updated.
    pub updated_at: Option<DateTime<Utc>>,

    /// Records grouped by category.
    #[serde(default)]
    pub results: ResultAggregator,
}

impl LastRun {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Path of the file for a project.
    pub fn file_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join("last-run.yml")
    }

    /// Wrap an aggregate.
    pub fn new(results: ResultAggregator) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            updated_at: Some(Utc::now()),
            results,
        }
    }

    /// Load the last run, or an empty one if none was saved.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::file_path(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| AuditError::ConfigParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Save the last run.
    ///
    /// Uses the write-to-temp-then-rename pattern to prevent corruption.
    pub fn save(&mut self, project_root: &Path) -> Result<()> {
        let path = Self::file_path(project_root);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        self.version = Self::CURRENT_VERSION;
        self.updated_at = Some(Utc::now());
        let content =
            serde_yaml::to_string(self).map_err(|e| AuditError::ConfigValidationError {
                message: format!("Failed to serialize last run: {}", e),
            })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Merge a newer aggregate over the stored one.
    pub fn merge(&mut self, newer: ResultAggregator) {
        self.results.merge_all(newer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{AuditReason, CheckDefinition, Severity};
    use crate::runner::{AuditRecord, ExecutionState};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn record(id: &str, reason: AuditReason) -> AuditRecord {
        AuditRecord {
            definition: CheckDefinition::new(id, id, "performance", Severity::Low),
            reason,
            message: String::new(),
            explanations: BTreeMap::new(),
            duration_ms: 0,
            state: ExecutionState::Executed,
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let last = LastRun::load(temp.path()).unwrap();
        assert!(last.results.is_empty());
        assert!(last.updated_at.is_none());
    }

    #[test]
    fn save_and_load_keeps_records() {
        let temp = TempDir::new().unwrap();
        let mut last = LastRun::new(ResultAggregator::from_records([
            record("a", AuditReason::fail("a").with_argument("list", vec!["x", "y"])),
            record("b", AuditReason::pass("b")),
        ]));
        last.save(temp.path()).unwrap();

        let temp_path = LastRun::file_path(temp.path()).with_extension("yml.tmp");
        assert!(!temp_path.exists());

        let loaded = LastRun::load(temp.path()).unwrap();
        assert_eq!(loaded.results.len(), 2);
        assert!(loaded.results.get("a").unwrap().reason.is_fail());
        assert_eq!(loaded.results.get("a").unwrap().reason.arguments["list"][1], "y");
    }

    #[test]
    fn merge_replaces_single_entry() {
        let mut last = LastRun::new(ResultAggregator::from_records([
            record("a", AuditReason::fail("a")),
            record("b", AuditReason::fail("b")),
        ]));
        last.merge(ResultAggregator::from_records([record("a", AuditReason::pass("a"))]));

        assert!(last.results.get("a").unwrap().reason.is_pass());
        assert!(last.results.get("b").unwrap().reason.is_fail());
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = LastRun::file_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "results: [unclosed").unwrap();

        assert!(matches!(
            LastRun::load(temp.path()),
            Err(AuditError::ConfigParseError { .. })
        ));
    }
}
