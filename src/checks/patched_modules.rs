//! Locally patched contributed modules.

use std::sync::Arc;

use anyhow::anyhow;
use serde_json::json;

use crate::check::{
    AuditReason, Check, CheckContext, CheckDefinition, Explanation, ReasonRenderable, Requirement,
    RequirementsAware, Severity,
};
use crate::environment::PatchReportSource;
use crate::messages::MessageType;
use crate::requirements::RequirementStatus;

pub const ID: &str = "patched_modules_check";

/// Custom requirement satisfied once the patch report exists.
pub const REPORT_REQUIREMENT: &str = "patch_report";

pub fn definition() -> CheckDefinition {
    CheckDefinition::new(ID, "Patched modules", "core_and_modules", Severity::High)
        .with_requirement(Requirement::Module("hacked".into()))
        .with_requirement(Requirement::Custom(REPORT_REQUIREMENT.into()))
        .with_message(
            MessageType::Description,
            "Compares installed modules with their upstream releases to find local modifications.",
        )
        .with_message(
            MessageType::Action,
            "Move local changes into patch files or upstream contributions.",
        )
        .with_message(
            MessageType::Impact,
            "Locally modified modules are overwritten by updates, so security releases get skipped or break the site.",
        )
        .with_message(MessageType::FailMessage, "Some modules contain local changes.")
        .with_message(MessageType::SuccessMessage, "No module contains local changes.")
}

/// Fails when any module in the patch report differs from upstream.
pub struct PatchedModules {
    requirements: Vec<Requirement>,
    reports: Arc<dyn PatchReportSource>,
}

impl PatchedModules {
    pub fn new(ctx: &CheckContext<'_>, reports: Arc<dyn PatchReportSource>) -> Self {
        Self {
            requirements: ctx.definition.requirements.clone(),
            reports,
        }
    }
}

impl Check for PatchedModules {
    fn perform(&self) -> anyhow::Result<AuditReason> {
        let report = self
            .reports
            .fetch_patch_report()?
            .ok_or_else(|| anyhow!("Patch report is not generated"))?;

        let modified: Vec<serde_json::Value> = report
            .modified_modules()
            .map(|p| {
                json!({
                    "name": p.name,
                    "title": p.display_name(),
                    "different": p.counts.different,
                })
            })
            .collect();

        if modified.is_empty() {
            return Ok(AuditReason::pass(ID));
        }
        Ok(AuditReason::fail(ID)
            .with_reason(format!("{} module(s) differ from upstream", modified.len()))
            .with_argument("hacked_modules", modified))
    }

    fn requirements_aware(&self) -> Option<&dyn RequirementsAware> {
        Some(self)
    }

    fn reason_renderable(&self) -> Option<&dyn ReasonRenderable> {
        Some(self)
    }
}

impl RequirementsAware for PatchedModules {
    fn requirements(&self) -> Vec<Requirement> {
        self.requirements.clone()
    }

    fn verify_custom(&self, name: &str) -> anyhow::Result<RequirementStatus> {
        if name != REPORT_REQUIREMENT {
            return Ok(RequirementStatus::unmet(format!("Unknown requirement {}", name)));
        }
        Ok(match self.reports.fetch_patch_report()? {
            Some(_) => RequirementStatus::Satisfied,
            None => RequirementStatus::unmet(
                "Patch report is not generated. Generate it with the hacked module and set environment.patch_report",
            ),
        })
    }
}

impl ReasonRenderable for PatchedModules {
    fn render_reason(&self, reason: &AuditReason, kind: MessageType) -> Option<Explanation> {
        if kind != MessageType::Action {
            return None;
        }
        let modules = reason.arguments.get("hacked_modules")?.as_array()?;
        let items: Vec<String> = modules
            .iter()
            .filter_map(|m| {
                let title = m.get("title")?.as_str()?;
                let different = m.get("different")?.as_u64()?;
                Some(format!("{} ({} changed files)", title, different))
            })
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(Explanation::list(
            Some("Review local changes in:".to_string()),
            items,
        ))
    }
}
