//! The pluggable check interface and its optional capabilities.
//!
//! Every check implements [`Check`]. Extra behaviour is exposed through
//! capability queries (`requirements_aware`, `configurable_form`,
//! `reason_renderable`) that return `None` unless the check opts in, so
//! callers ask "does this check support X" without downcasting.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::definition::Requirement;
use super::reason::AuditReason;
use crate::messages::MessageType;
use crate::requirements::RequirementStatus;

/// Optional behaviours a check may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ConfigurableForm,
    RequirementsAware,
    ReasonRenderable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::ConfigurableForm => write!(f, "configurable"),
            Capability::RequirementsAware => write!(f, "requirements"),
            Capability::ReasonRenderable => write!(f, "renderable"),
        }
    }
}

/// A single auditable aspect of the environment.
///
/// # Example
///
/// ```
/// use advaudit::check::{AuditReason, Check};
///
/// struct AlwaysPasses;
///
/// impl Check for AlwaysPasses {
///     fn perform(&self) -> anyhow::Result<AuditReason> {
///         Ok(AuditReason::pass("always_passes"))
///     }
/// }
///
/// assert!(AlwaysPasses.perform().unwrap().is_pass());
/// ```
pub trait Check: Send + Sync {
    /// Run the check once and return Pass or Fail.
    ///
    /// Expected domain failures are a `Fail` result, not an error. Errors
    /// (and panics) are caught by the runner and reported as `Fail`.
    fn perform(&self) -> anyhow::Result<AuditReason>;

    /// Prerequisites consumed by the requirements gate.
    fn requirements_aware(&self) -> Option<&dyn RequirementsAware> {
        None
    }

    /// User-editable settings.
    fn configurable_form(&self) -> Option<&dyn ConfigurableForm> {
        None
    }

    /// Structured explanation content.
    fn reason_renderable(&self) -> Option<&dyn ReasonRenderable> {
        None
    }

    /// Whether this check supports a capability.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ConfigurableForm => self.configurable_form().is_some(),
            Capability::RequirementsAware => self.requirements_aware().is_some(),
            Capability::ReasonRenderable => self.reason_renderable().is_some(),
        }
    }

    /// All supported capabilities.
    fn capabilities(&self) -> Vec<Capability> {
        [
            Capability::RequirementsAware,
            Capability::ConfigurableForm,
            Capability::ReasonRenderable,
        ]
        .into_iter()
        .filter(|c| self.supports(*c))
        .collect()
    }
}

/// A check that declares prerequisites.
pub trait RequirementsAware {
    /// Named prerequisites, evaluated in order.
    fn requirements(&self) -> Vec<Requirement>;

    /// Verify a [`Requirement::Custom`] prerequisite.
    fn verify_custom(&self, _name: &str) -> anyhow::Result<RequirementStatus> {
        Ok(RequirementStatus::Satisfied)
    }
}

/// Kind of input a settings field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    /// Multi-line text, one entry per line.
    Textarea,
    Checkbox,
}

/// One user-editable setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub description: String,
    pub kind: FieldKind,
    /// Current value (stored value or compiled default).
    pub value: String,
}

/// Submitted settings, keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// A check with user-editable settings.
pub trait ConfigurableForm {
    /// Fields with their current values.
    fn form_schema(&self) -> Vec<FormField>;

    /// Validation errors for submitted values; empty when valid.
    fn validate_form(&self, _values: &FormValues) -> Vec<String> {
        Vec::new()
    }

    /// Persist validated values.
    fn submit_form(&self, values: &FormValues) -> anyhow::Result<()>;
}

/// Structured explanation content for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Explanation {
    Text { text: String },
    List { title: Option<String>, items: Vec<String> },
    Group { parts: Vec<Explanation> },
}

impl Explanation {
    pub fn text(text: impl Into<String>) -> Self {
        Explanation::Text { text: text.into() }
    }

    pub fn list(title: Option<String>, items: Vec<String>) -> Self {
        Explanation::List { title, items }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Explanation::Text { text } => text.is_empty(),
            Explanation::List { title, items } => title.is_none() && items.is_empty(),
            Explanation::Group { parts } => parts.iter().all(Explanation::is_empty),
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Text { text } => write!(f, "{}", text),
            Explanation::List { title, items } => {
                let mut first = true;
                if let Some(title) = title {
                    write!(f, "{}", title)?;
                    first = false;
                }
                for item in items {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "  - {}", item)?;
                    first = false;
                }
                Ok(())
            }
            Explanation::Group { parts } => {
                let parts: Vec<&Explanation> = parts.iter().filter(|p| !p.is_empty()).collect();
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}

/// A check that renders richer explanations than plain reason text.
pub trait ReasonRenderable {
    /// Explanation for a message type, or `None` to fall back to plain text.
    fn render_reason(&self, reason: &AuditReason, kind: MessageType) -> Option<Explanation>;
}
