//! ImageAPI Optimize pipeline coverage check.
//!
//! Settings read:
//! - `imageapi_optimize.pipelines`: sequence of pipeline names, or a mapping keyed by name
//! - `image.styles`: mapping of style id to either a pipeline name or
//!   `{ label, pipeline }`

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_yaml::Value;

use crate::check::{
    AuditReason, Check, CheckContext, CheckDefinition, Explanation, ReasonRenderable, Severity,
};
use crate::environment::{ModuleProbe, SettingsProvider};
use crate::messages::MessageType;

pub const ID: &str = "imageapi_optimize_check";

const MODULE: &str = "imageapi_optimize";
const LINK: &str = "https://www.drupal.org/project/imageapi_optimize";

pub fn definition() -> CheckDefinition {
    CheckDefinition::new(ID, "ImageAPI Optimize", "performance", Severity::Low)
        .with_message(
            MessageType::Description,
            "Checks that image derivatives are optimized by an ImageAPI Optimize pipeline.",
        )
        .with_message(
            MessageType::Action,
            "Install ${link}, create a pipeline and assign it to every image style.",
        )
        .with_message(
            MessageType::Impact,
            "Unoptimized images increase page weight and slow down rendering on mobile networks.",
        )
        .with_message(MessageType::FailMessage, "Image optimization is not configured.")
        .with_message(
            MessageType::SuccessMessage,
            "Every image style uses an optimization pipeline.",
        )
}

/// Fails unless the module is present, has pipelines, and every image
/// style uses a known pipeline.
pub struct ImageApiOptimize {
    settings: Arc<dyn SettingsProvider>,
    modules: Arc<dyn ModuleProbe>,
}

impl ImageApiOptimize {
    pub fn new(ctx: &CheckContext<'_>) -> Self {
        Self {
            settings: Arc::clone(&ctx.env.settings),
            modules: Arc::clone(&ctx.env.modules),
        }
    }

    fn pipelines(&self) -> anyhow::Result<BTreeSet<String>> {
        let names: BTreeSet<String> = match self.settings.get("imageapi_optimize.pipelines")? {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            Some(Value::Mapping(map)) => map
                .keys()
                .filter_map(|k| k.as_str().map(String::from))
                .collect(),
            _ => BTreeSet::new(),
        };
        Ok(names.into_iter().filter(|n| !n.is_empty()).collect())
    }

    /// Labels of styles whose pipeline is unknown, sorted by style id.
    fn unconfigured_styles(&self, pipelines: &BTreeSet<String>) -> anyhow::Result<Vec<String>> {
        let Some(Value::Mapping(styles)) = self.settings.get("image.styles")? else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(String, String, Option<String>)> = styles
            .iter()
            .filter_map(|(id, style)| {
                let id = id.as_str()?.to_string();
                let (label, pipeline) = match style {
                    Value::String(pipeline) => (id.clone(), Some(pipeline.clone())),
                    Value::Mapping(_) => (
                        style
                            .get("label")
                            .and_then(Value::as_str)
                            .unwrap_or(&id)
                            .to_string(),
                        style.get("pipeline").and_then(Value::as_str).map(String::from),
                    ),
                    _ => (id.clone(), None),
                };
                Some((id, label, pipeline))
            })
            .collect();
        entries.sort();

        Ok(entries
            .into_iter()
            .filter(|(_, _, pipeline)| !pipeline.as_ref().is_some_and(|p| pipelines.contains(p)))
            .map(|(_, label, _)| label)
            .collect())
    }
}

impl Check for ImageApiOptimize {
    fn perform(&self) -> anyhow::Result<AuditReason> {
        if !self.modules.exists(MODULE)? {
            return Ok(AuditReason::fail(ID)
                .with_reason("The ImageAPI Optimize module is not installed.")
                .with_argument("link", LINK));
        }

        let pipelines = self.pipelines()?;
        if pipelines.is_empty() {
            return Ok(AuditReason::fail(ID)
                .with_reason("ImageAPI Optimize is installed, but no pipeline is created.")
                .with_argument("link", LINK));
        }

        let styles = self.unconfigured_styles(&pipelines)?;
        if !styles.is_empty() {
            return Ok(AuditReason::fail(ID)
                .with_reason("ImageAPI Optimize is installed, some image styles are not configured:")
                .with_argument("link", LINK)
                .with_argument("list", styles));
        }

        Ok(AuditReason::pass(ID).with_argument("link", LINK))
    }

    fn reason_renderable(&self) -> Option<&dyn ReasonRenderable> {
        Some(self)
    }
}

impl ReasonRenderable for ImageApiOptimize {
    fn render_reason(&self, reason: &AuditReason, kind: MessageType) -> Option<Explanation> {
        if kind != MessageType::FailMessage || !reason.is_fail() {
            return None;
        }

        let message = Explanation::text(reason.reason_text());
        let items: Vec<String> = reason
            .arguments
            .get("list")
            .and_then(serde_json::Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        if items.is_empty() {
            return Some(message);
        }
        Some(Explanation::Group {
            parts: vec![message, Explanation::list(None, items)],
        })
    }
}
