//! Requirement and gate outcome types.

use std::fmt;

use crate::check::Requirement;

/// The result of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementStatus {
    /// Prerequisite is available.
    Satisfied,

    /// Prerequisite is missing.
    Unmet {
        /// Human-readable diagnostic naming what is missing.
        reason: String,
    },
}

impl RequirementStatus {
    /// Shorthand for an unmet requirement.
    pub fn unmet(reason: impl Into<String>) -> Self {
        RequirementStatus::Unmet {
            reason: reason.into(),
        }
    }

    /// Whether the check may proceed past this requirement.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RequirementStatus::Satisfied)
    }
}

/// The first requirement that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub requirement: Requirement,
    pub reason: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason, self.requirement)
    }
}

/// What the gate decided for one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Reject(Rejection),
}

impl GateDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}
