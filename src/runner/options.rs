//! Runner options and check selection.

use std::time::Duration;

use crate::check::{CheckDefinition, CheckId, Severity};
use crate::config::Settings;

/// How checks are executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Upper bound for gate + perform of one check. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Checks evaluated concurrently by `run_all`.
    pub workers: usize,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            workers: 1,
        }
    }
}

impl RunnerOptions {
    /// Options from the config file settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timeout: (settings.timeout_secs > 0)
                .then(|| Duration::from_secs(settings.timeout_secs)),
            workers: settings.workers.max(1),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Which checks `run_all` selects. Empty lists select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    pub categories: Vec<String>,
    pub severities: Vec<Severity>,
    pub ids: Vec<CheckId>,
}

impl RunFilter {
    /// Select everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severities.push(severity);
        self
    }

    pub fn id(mut self, id: impl Into<CheckId>) -> Self {
        self.ids.push(id.into());
        self
    }

    /// Whether a definition passes the filter. `enabled` is not considered.
    pub fn matches(&self, definition: &CheckDefinition) -> bool {
        (self.categories.is_empty() || self.categories.contains(&definition.category))
            && (self.severities.is_empty() || self.severities.contains(&definition.severity))
            && (self.ids.is_empty() || self.ids.contains(&definition.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> CheckDefinition {
        CheckDefinition::new("backend_cache_settings", "Cache", "performance", Severity::Critical)
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(RunFilter::all().matches(&definition()));
    }

    #[test]
    fn category_and_severity_must_both_match() {
        assert!(RunFilter::all()
            .category("performance")
            .severity(Severity::Critical)
            .matches(&definition()));
        assert!(!RunFilter::all()
            .category("performance")
            .severity(Severity::Low)
            .matches(&definition()));
        assert!(!RunFilter::all().category("security").matches(&definition()));
    }

    #[test]
    fn id_filter() {
        assert!(RunFilter::all().id("backend_cache_settings").matches(&definition()));
        assert!(!RunFilter::all().id("other").matches(&definition()));
    }

    #[test]
    fn zero_timeout_disables_timeout() {
        let settings = Settings {
            timeout_secs: 0,
            workers: 0,
            ..Settings::default()
        };
        let options = RunnerOptions::from_settings(&settings);
        assert_eq!(options.timeout, None);
        assert_eq!(options.workers, 1);
    }
}
