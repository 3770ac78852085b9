//! Requirement gating before a check runs.
//!
//! # Modules
//!
//! - [`gate`] - The [`RequirementsGate`] evaluating declared prerequisites
//! - [`status`] - Requirement and gate outcome types

pub mod gate;
pub mod status;

pub use gate::RequirementsGate;
pub use status::{GateDecision, Rejection, RequirementStatus};
