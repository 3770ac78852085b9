//! CSS/JS aggregation check.

use std::sync::Arc;

use crate::check::{AuditReason, Check, CheckContext, CheckDefinition, Severity};
use crate::environment::SettingsProvider;
use crate::messages::MessageType;

pub const ID: &str = "js_css_aggregation";

const ADVAGG_LINK: &str = "https://www.drupal.org/project/advagg";

pub fn definition() -> CheckDefinition {
    CheckDefinition::new(ID, "Javascript & CSS aggregation", "performance", Severity::High)
        .with_message(
            MessageType::Description,
            "Allows you to improve the frontend performance of your site by serving fewer, larger CSS and JS files.",
        )
        .with_message(
            MessageType::Action,
            "Enable core aggregation or use Advanced CSS/JS Aggregation (${link}).",
        )
        .with_message(
            MessageType::Impact,
            "Without aggregation every page issues many separate asset requests, increasing load time.",
        )
        .with_message(MessageType::FailMessage, "Aggregation is disabled for: ${disabled}.")
        .with_message(MessageType::SuccessMessage, "CSS and JS aggregation are enabled.")
}

/// Passes when both CSS and JS preprocessing are enabled.
pub struct JsCssAggregation {
    settings: Arc<dyn SettingsProvider>,
}

impl JsCssAggregation {
    pub fn new(ctx: &CheckContext<'_>) -> Self {
        Self {
            settings: Arc::clone(&ctx.env.settings),
        }
    }
}

impl Check for JsCssAggregation {
    fn perform(&self) -> anyhow::Result<AuditReason> {
        let mut disabled = Vec::new();
        if !self.settings.get_bool("system.performance.css.preprocess")? {
            disabled.push("css");
        }
        if !self.settings.get_bool("system.performance.js.preprocess")? {
            disabled.push("js");
        }

        let reason = if disabled.is_empty() {
            AuditReason::pass(ID)
        } else {
            AuditReason::fail(ID)
                .with_reason("CSS/JS aggregation is not fully enabled")
                .with_argument("disabled", disabled)
        };
        Ok(reason.with_argument("link", ADVAGG_LINK))
    }
}
