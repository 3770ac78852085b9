//! The result of executing one check.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::definition::CheckId;

/// Ordered named values used to render explanation content.
pub type Arguments = serde_json::Map<String, Value>;

/// Outcome of a single check execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pass,
    Fail,
    /// Only produced when the requirements gate rejected the check.
    Skip,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Pass => write!(f, "pass"),
            AuditStatus::Fail => write!(f, "fail"),
            AuditStatus::Skip => write!(f, "skip"),
        }
    }
}

/// Structured verdict for one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReason {
    pub check_id: CheckId,
    pub status: AuditStatus,
    /// Human-readable explanation, if the check produced one.
    pub reason: Option<String>,
    #[serde(default)]
    pub arguments: Arguments,
}

impl AuditReason {
    /// A passing result.
    pub fn pass(check_id: impl Into<CheckId>) -> Self {
        Self::with_status(check_id.into(), AuditStatus::Pass)
    }

    /// A failing result.
    pub fn fail(check_id: impl Into<CheckId>) -> Self {
        Self::with_status(check_id.into(), AuditStatus::Fail)
    }

    pub(crate) fn skip(check_id: CheckId, reason: impl Into<String>) -> Self {
        Self::with_status(check_id, AuditStatus::Skip).with_reason(reason)
    }

    fn with_status(check_id: CheckId, status: AuditStatus) -> Self {
        Self {
            check_id,
            status,
            reason: None,
            arguments: Arguments::new(),
        }
    }

    /// Attach a human-readable reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach a named argument. Later values for the same name replace earlier ones.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// The reason text, or an empty string.
    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }

    pub fn is_pass(&self) -> bool {
        self.status == AuditStatus::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == AuditStatus::Fail
    }

    pub fn is_skip(&self) -> bool {
        self.status == AuditStatus::Skip
    }
}
