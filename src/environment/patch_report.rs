//! External report of locally modified projects.
//!
//! The report is produced by a separate tool; the audit only reads it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File counts of one project compared with its upstream release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchCounts {
    pub same: u64,
    pub different: u64,
    pub missing: u64,
}

/// One project entry of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchedProject {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// `module`, `theme`, `core`, ...
    pub project_type: String,
    #[serde(default)]
    pub counts: PatchCounts,
}

impl PatchedProject {
    /// Title if present, otherwise the machine name.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A generated patch report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchReport {
    #[serde(default)]
    pub projects: Vec<PatchedProject>,
}

impl PatchReport {
    /// Modules whose files differ from upstream.
    pub fn modified_modules(&self) -> impl Iterator<Item = &PatchedProject> {
        self.projects
            .iter()
            .filter(|p| p.project_type == "module" && p.counts.different > 0)
    }
}

/// Source of the patch report.
pub trait PatchReportSource: Send + Sync {
    /// The current report, or `None` when it has not been generated.
    fn fetch_patch_report(&self) -> anyhow::Result<Option<PatchReport>>;
}

/// Report read from a YAML or JSON file.
#[derive(Debug, Clone, Default)]
pub struct FilePatchReport {
    path: Option<PathBuf>,
}

impl FilePatchReport {
    /// Read from `path`; `None` means no report is configured.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PatchReportSource for FilePatchReport {
    fn fetch_patch_report(&self) -> anyhow::Result<Option<PatchReport>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read patch report {}", path.display()))?;
        let report = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse patch report {}", path.display()))?;
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REPORT: &str = r#"
projects:
  - name: views_ui
    project_type: module
    counts: { same: 10, different: 2 }
  - name: bartik
    project_type: theme
    counts: { different: 5 }
  - name: token
    title: Token
    project_type: module
    counts: { same: 4 }
"#;

    #[test]
    fn unconfigured_source_has_no_report() {
        assert_eq!(FilePatchReport::default().fetch_patch_report().unwrap(), None);
    }

    #[test]
    fn missing_file_has_no_report() {
        let temp = TempDir::new().unwrap();
        let source = FilePatchReport::new(Some(temp.path().join("hacked.yml")));
        assert_eq!(source.fetch_patch_report().unwrap(), None);
    }

    #[test]
    fn reads_report_and_filters_modules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hacked.yml");
        fs::write(&path, REPORT).unwrap();

        let report = FilePatchReport::new(Some(path))
            .fetch_patch_report()
            .unwrap()
            .unwrap();
        assert_eq!(report.projects.len(), 3);
        let modified: Vec<&str> = report.modified_modules().map(|p| p.name.as_str()).collect();
        assert_eq!(modified, vec!["views_ui"]);
        assert_eq!(report.projects[2].display_name(), "Token");
    }

    #[test]
    fn reads_json_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hacked.json");
        fs::write(
            &path,
            r#"{"projects":[{"name":"a","project_type":"module","counts":{"different":1}}]}"#,
        )
        .unwrap();

        let report = FilePatchReport::new(Some(path))
            .fetch_patch_report()
            .unwrap()
            .unwrap();
        assert_eq!(report.modified_modules().count(), 1);
    }

    #[test]
    fn malformed_report_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hacked.yml");
        fs::write(&path, "projects: [unclosed").unwrap();
        assert!(FilePatchReport::new(Some(path)).fetch_patch_report().is_err());
    }
}
