//! Stable report view of an aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::check::{AuditStatus, Severity};
use crate::messages::{MessageStore, MessageType};
use crate::runner::AuditRecord;

use super::aggregator::{CategoryStatus, ResultAggregator};

/// One check as seen by a reporting surface.
///
/// Every text field is always present; unset values are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub check_id: String,
    pub label: String,
    pub severity: Severity,
    pub status: AuditStatus,
    pub description: String,
    pub action: String,
    pub impact: String,
    /// Success or fail text, depending on status.
    pub message: String,
    /// Raw reason text from the check or the runner.
    pub reason: String,
    /// Structured explanation for the status message, rendered as text.
    pub details: String,
}

impl ReportEntry {
    fn build(record: &AuditRecord, messages: &MessageStore) -> Self {
        let id = record.check_id().as_str();
        let text = |kind: MessageType| match record.explanation(kind) {
            Some(explanation) => explanation.to_string(),
            None => messages.render(id, kind, &record.reason.arguments),
        };
        let details = match record.status() {
            AuditStatus::Pass => record.explanation(MessageType::SuccessMessage),
            AuditStatus::Fail => record.explanation(MessageType::FailMessage),
            AuditStatus::Skip => None,
        }
        .map(ToString::to_string)
        .unwrap_or_default();

        Self {
            check_id: id.to_string(),
            label: record.definition.label.clone(),
            severity: record.definition.severity,
            status: record.status(),
            description: text(MessageType::Description),
            action: text(MessageType::Action),
            impact: text(MessageType::Impact),
            message: record.message.clone(),
            reason: record.reason.reason_text().to_string(),
            details,
        }
    }
}

/// A category with its computed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub status: CategoryStatus,
    pub entries: Vec<ReportEntry>,
}

/// Counts by result status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Everything a reporting surface needs, in a stable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSnapshot {
    pub generated_at: DateTime<Utc>,
    pub status: CategoryStatus,
    pub summary: Summary,
    pub categories: Vec<CategoryReport>,
}

impl AuditSnapshot {
    pub(crate) fn build(aggregator: &ResultAggregator, messages: &MessageStore) -> Self {
        let categories: Vec<CategoryReport> = aggregator
            .categories()
            .map(|category| {
                let records = aggregator.category(category);
                CategoryReport {
                    category: category.to_string(),
                    status: CategoryStatus::from_statuses(records.iter().map(|r| r.status())),
                    entries: records
                        .iter()
                        .map(|record| ReportEntry::build(record, messages))
                        .collect(),
                }
            })
            .collect();

        let mut summary = Summary::default();
        for record in aggregator.records() {
            match record.status() {
                AuditStatus::Pass => summary.passed += 1,
                AuditStatus::Fail => summary.failed += 1,
                AuditStatus::Skip => summary.skipped += 1,
            }
        }

        Self {
            generated_at: Utc::now(),
            status: aggregator.overall_status(),
            summary,
            categories,
        }
    }

    /// Process exit code: 1 when any category failed.
    pub fn exit_code(&self) -> i32 {
        if self.categories.iter().any(|c| c.status.is_fail()) {
            1
        } else {
            0
        }
    }

    /// Entry for a check id.
    pub fn entry(&self, check_id: &str) -> Option<&ReportEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.check_id == check_id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
