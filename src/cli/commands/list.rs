//! List command implementation.
//!
//! The `advaudit list` command lists registered checks grouped by category,
//! with effective severity and disabled checks flagged.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::check::{CheckDefinition, Severity};
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::runner::AuditRunner;
use crate::ui::theme::AuditTheme;
use crate::ui::{should_use_colors, UserInterface};

use super::context::AuditContext;
use super::dispatcher::{Command, CommandResult};

/// One check in the listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListedCheck {
    pub id: String,
    pub label: String,
    pub severity: Severity,
    pub enabled: bool,
    pub configurable: bool,
}

/// One category in the listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListedCategory {
    pub category: String,
    pub checks: Vec<ListedCheck>,
}

/// Effective definitions grouped by category in declaration order.
pub fn list_checks(runner: &AuditRunner) -> Vec<ListedCategory> {
    let definitions = runner.definitions();
    runner
        .registry()
        .categories()
        .into_iter()
        .map(|category| ListedCategory {
            category: category.to_string(),
            checks: definitions
                .iter()
                .filter(|d| d.category == category)
                .map(|d| listed(runner, d))
                .collect(),
        })
        .collect()
}

fn listed(runner: &AuditRunner, definition: &CheckDefinition) -> ListedCheck {
    let configurable = runner
        .registry()
        .get(definition.id.as_str())
        .map(|check| check.configurable_form().is_some())
        .unwrap_or(false);
    ListedCheck {
        id: definition.id.to_string(),
        label: definition.label.clone(),
        severity: definition.severity,
        enabled: definition.enabled,
        configurable,
    }
}

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = AuditContext::load(&self.project_root)?;
        let categories = list_checks(&ctx.runner);

        if self.args.json {
            ui.emit(&serde_json::to_string_pretty(&categories).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        let theme = if should_use_colors() {
            AuditTheme::new()
        } else {
            AuditTheme::plain()
        };
        for category in &categories {
            ui.show_header(&category.category, None);
            for check in &category.checks {
                let mut flags = vec![check.severity.to_string()];
                if check.configurable {
                    flags.push("configurable".to_string());
                }
                if !check.enabled {
                    flags.push("disabled".to_string());
                }
                ui.message(&format!(
                    "  {} {} {}",
                    theme.highlight.apply_to(&check.id),
                    check.label,
                    theme.dim.apply_to(format!("[{}]", flags.join(", ")))
                ));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".advaudit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn lists_by_category_in_declaration_order() {
        let temp = project("{}");
        let ctx = AuditContext::load(temp.path()).unwrap();
        let categories = list_checks(&ctx.runner);

        let names: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            names,
            vec!["performance", "server_configuration", "core_and_modules"]
        );
        assert_eq!(categories[0].checks.len(), 3);
        assert!(categories[1].checks[0].configurable);
    }

    #[test]
    fn flags_disabled_checks_and_overridden_severity() {
        let temp = project(
            "checks:\n  js_css_aggregation:\n    enabled: false\n    severity: low\n",
        );
        let mut ui = MockUI::new();
        ListCommand::new(temp.path(), ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("js_css_aggregation"));
        let line = ui
            .messages()
            .iter()
            .find(|m| m.contains("js_css_aggregation"))
            .unwrap();
        assert!(line.contains("[low, disabled]"));
    }

    #[test]
    fn json_listing() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        ListCommand::new(temp.path(), ListArgs { json: true })
            .execute(&mut ui)
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.emitted()).unwrap();
        assert_eq!(json[0]["checks"][0]["id"], "backend_cache_settings");
        assert_eq!(json[0]["checks"][0]["enabled"], true);
    }
}
