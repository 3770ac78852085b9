//! The check model: definitions, results, capabilities and the registry.
//!
//! # Modules
//!
//! - [`definition`] - Static metadata ([`CheckDefinition`], [`Severity`], [`Requirement`])
//! - [`reason`] - Execution results ([`AuditReason`], [`AuditStatus`])
//! - [`capability`] - The [`Check`] trait and its optional capabilities
//! - [`registry`] - The [`CheckRegistry`] registration table

pub mod capability;
pub mod definition;
pub mod reason;
pub mod registry;

pub use capability::{
    Capability, Check, ConfigurableForm, Explanation, FieldKind, FormField, FormValues,
    ReasonRenderable, RequirementsAware,
};
pub use definition::{CheckDefinition, CheckId, Requirement, Severity};
pub use reason::{Arguments, AuditReason, AuditStatus};
pub use registry::{CategoryGroup, CheckContext, CheckFactory, CheckRegistry};
