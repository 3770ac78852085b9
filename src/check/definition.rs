//! Static check metadata.
//!
//! A [`CheckDefinition`] is declared once per check type when the registry
//! is populated. It never changes afterwards; configuration overrides for
//! `enabled` and `severity` produce a separate effective copy.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::messages::MessageType;

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(String);

impl CheckId {
    /// Create a new check ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for CheckId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CheckId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How serious a failing check is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    High,
    Critical,
}

impl Severity {
    /// All severities, most serious first.
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::High, Severity::Low];

    /// Lowercase name used in config and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "low" => Ok(Severity::Low),
            _ => Err(AuditError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

/// A named prerequisite a check declares before it may run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Requirement {
    /// A module/feature must be present according to the module probe.
    Module(String),
    /// A settings path must resolve to a value.
    Setting(String),
    /// Verified by the check itself through its `RequirementsAware` capability.
    Custom(String),
}

impl Requirement {
    /// The prerequisite's name without its kind.
    pub fn name(&self) -> &str {
        match self {
            Requirement::Module(name) | Requirement::Setting(name) | Requirement::Custom(name) => {
                name
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Module(name) => write!(f, "module: {}", name),
            Requirement::Setting(path) => write!(f, "setting: {}", path),
            Requirement::Custom(name) => write!(f, "custom: {}", name),
        }
    }
}

/// Static metadata for one check type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub id: CheckId,
    pub label: String,
    /// Grouping key for reports.
    pub category: String,
    pub severity: Severity,
    /// Declared prerequisites, evaluated only for `RequirementsAware` checks.
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    pub enabled: bool,
    /// Compiled-in message defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<MessageType, String>,
}

impl CheckDefinition {
    /// Create an enabled definition with no requirements or messages.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: CheckId::new(id),
            label: label.into(),
            category: category.into(),
            severity,
            requirements: Vec::new(),
            enabled: true,
            messages: BTreeMap::new(),
        }
    }

    /// Declare a prerequisite.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Declare a default message text.
    pub fn with_message(mut self, kind: MessageType, text: impl Into<String>) -> Self {
        self.messages.insert(kind, text.into());
        self
    }

    /// Ship the check disabled by default.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Compiled default for a message type, or an empty string.
    pub fn default_message(&self, kind: MessageType) -> &str {
        self.messages.get(&kind).map(String::as_str).unwrap_or("")
    }
}
