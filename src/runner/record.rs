//! Per-execution records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::check::{AuditReason, AuditStatus, CheckDefinition, CheckId, Explanation};
use crate::messages::MessageType;

/// Phase a single execution has reached.
///
/// `NotStarted → Gated → Executed → Reported`. A check rejected by the
/// gate stops at `Gated`; `Reported` is set when the record is merged
/// into an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    NotStarted,
    Gated,
    Executed,
    Reported,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::NotStarted => write!(f, "not started"),
            ExecutionState::Gated => write!(f, "gated"),
            ExecutionState::Executed => write!(f, "executed"),
            ExecutionState::Reported => write!(f, "reported"),
        }
    }
}

/// The outcome of one check execution with everything needed to report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Definition with configured overrides applied.
    pub definition: CheckDefinition,
    pub reason: AuditReason,
    /// Success text on Pass, fail text on Fail, empty on Skip.
    #[serde(default)]
    pub message: String,
    /// Structured explanations from checks that render their own.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub explanations: BTreeMap<MessageType, Explanation>,
    pub duration_ms: u64,
    pub state: ExecutionState,
    pub finished_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn check_id(&self) -> &CheckId {
        &self.definition.id
    }

    pub fn category(&self) -> &str {
        &self.definition.category
    }

    pub fn status(&self) -> AuditStatus {
        self.reason.status
    }

    /// Explanation for a message type, if the check rendered one.
    pub fn explanation(&self, kind: MessageType) -> Option<&Explanation> {
        self.explanations.get(&kind)
    }
}
