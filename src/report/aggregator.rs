//! Accumulation of execution records by category.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::check::AuditStatus;
use crate::messages::MessageStore;
use crate::runner::{AuditRecord, ExecutionState};

use super::snapshot::AuditSnapshot;

/// Summary status of a category (or of a whole aggregate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    /// At least one check failed.
    Fail,
    /// No failures and at least one pass; skips are ignored.
    Pass,
    /// Nothing but skipped checks.
    Informational,
}

impl CategoryStatus {
    /// Fold statuses into a category status.
    pub fn from_statuses(statuses: impl IntoIterator<Item = AuditStatus>) -> Self {
        let mut any_pass = false;
        for status in statuses {
            match status {
                AuditStatus::Fail => return CategoryStatus::Fail,
                AuditStatus::Pass => any_pass = true,
                AuditStatus::Skip => {}
            }
        }
        if any_pass {
            CategoryStatus::Pass
        } else {
            CategoryStatus::Informational
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CategoryStatus::Fail)
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryStatus::Fail => write!(f, "fail"),
            CategoryStatus::Pass => write!(f, "pass"),
            CategoryStatus::Informational => write!(f, "informational"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CategoryRecords {
    category: String,
    records: Vec<AuditRecord>,
}

/// Records grouped by category, one per check id.
///
/// Categories and the records within them keep insertion order. Merging a
/// record for a check that is already present replaces it in place, so a
/// single-check re-run updates only that entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultAggregator {
    categories: Vec<CategoryRecords>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an aggregate from stored records.
    pub fn from_records(records: impl IntoIterator<Item = AuditRecord>) -> Self {
        let mut aggregator = Self::new();
        for record in records {
            aggregator.merge(record);
        }
        aggregator
    }

    /// Add or replace the record for its check id.
    pub fn merge(&mut self, mut record: AuditRecord) {
        record.state = ExecutionState::Reported;
        let id = record.check_id().clone();

        // A stored record may sit under an older category name.
        for group in &mut self.categories {
            if group.category != record.category() {
                group.records.retain(|r| r.check_id() != &id);
            }
        }
        self.categories.retain(|group| !group.records.is_empty());

        match self
            .categories
            .iter_mut()
            .find(|group| group.category == record.category())
        {
            Some(group) => match group.records.iter_mut().find(|r| r.check_id() == &id) {
                Some(existing) => *existing = record,
                None => group.records.push(record),
            },
            None => self.categories.push(CategoryRecords {
                category: record.category().to_string(),
                records: vec![record],
            }),
        }
    }

    /// Merge every record of another aggregate.
    pub fn merge_all(&mut self, other: ResultAggregator) {
        for record in other.into_records() {
            self.merge(record);
        }
    }

    /// Record for a check id.
    pub fn get(&self, id: &str) -> Option<&AuditRecord> {
        self.records().find(|r| r.check_id().as_str() == id)
    }

    /// Records of a category in insertion order.
    pub fn category(&self, category: &str) -> &[AuditRecord] {
        self.categories
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.records.as_slice())
            .unwrap_or(&[])
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|group| group.category.as_str())
    }

    /// All records, category by category.
    pub fn records(&self) -> impl Iterator<Item = &AuditRecord> {
        self.categories.iter().flat_map(|group| group.records.iter())
    }

    pub fn into_records(self) -> impl Iterator<Item = AuditRecord> {
        self.categories.into_iter().flat_map(|group| group.records)
    }

    /// Status of one category, if it has any records.
    pub fn category_status(&self, category: &str) -> Option<CategoryStatus> {
        let records = self.category(category);
        if records.is_empty() {
            return None;
        }
        Some(CategoryStatus::from_statuses(records.iter().map(|r| r.status())))
    }

    /// Status across all categories.
    pub fn overall_status(&self) -> CategoryStatus {
        CategoryStatus::from_statuses(self.records().map(|r| r.status()))
    }

    /// Whether any record failed.
    pub fn has_failures(&self) -> bool {
        self.records().any(|r| r.status() == AuditStatus::Fail)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|group| group.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Read-only report view with message text resolved.
    pub fn snapshot(&self, messages: &MessageStore) -> AuditSnapshot {
        AuditSnapshot::build(self, messages)
    }
}
