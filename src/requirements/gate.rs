//! Pre-execution requirement gating.

use tracing::debug;

use super::status::{GateDecision, Rejection, RequirementStatus};
use crate::check::{Check, CheckId, Requirement, RequirementsAware};
use crate::environment::AuditEnvironment;
use crate::error::{AuditError, Result};

/// Decides whether a check's prerequisites allow it to run.
///
/// Checks without the `RequirementsAware` capability always proceed.
/// Otherwise requirements are evaluated in declaration order and the first
/// unmet one rejects the check. A collaborator failure while evaluating is
/// returned as [`AuditError::Environment`].
#[derive(Debug, Clone)]
pub struct RequirementsGate {
    env: AuditEnvironment,
}

impl RequirementsGate {
    pub fn new(env: AuditEnvironment) -> Self {
        Self { env }
    }

    /// Evaluate a check's requirements.
    pub fn evaluate(&self, check_id: &CheckId, check: &dyn Check) -> Result<GateDecision> {
        let Some(aware) = check.requirements_aware() else {
            debug!(check = %check_id, "No requirements capability, proceeding");
            return Ok(GateDecision::Proceed);
        };

        for requirement in aware.requirements() {
            let status = self
                .evaluate_one(&requirement, aware)
                .map_err(|e| AuditError::Environment {
                    check: check_id.to_string(),
                    message: format!("{} ({:#})", requirement, e),
                })?;

            if let RequirementStatus::Unmet { reason } = status {
                debug!(check = %check_id, %requirement, "Requirement unmet");
                return Ok(GateDecision::Reject(Rejection {
                    requirement,
                    reason,
                }));
            }
        }

        debug!(check = %check_id, "All requirements satisfied");
        Ok(GateDecision::Proceed)
    }

    fn evaluate_one(
        &self,
        requirement: &Requirement,
        aware: &dyn RequirementsAware,
    ) -> anyhow::Result<RequirementStatus> {
        match requirement {
            Requirement::Module(name) => Ok(if self.env.modules.exists(name)? {
                RequirementStatus::Satisfied
            } else {
                RequirementStatus::unmet(format!("Module {} is not enabled", name))
            }),
            Requirement::Setting(path) => Ok(if self.env.settings.get(path)?.is_some() {
                RequirementStatus::Satisfied
            } else {
                RequirementStatus::unmet(format!("Setting {} is not configured", path))
            }),
            Requirement::Custom(name) => aware.verify_custom(name),
        }
    }
}
