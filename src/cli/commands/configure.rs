//! Configure command implementation.
//!
//! `advaudit configure <ID>` persists enabled/severity overrides and submits
//! form values for checks with a configuration form. Without flags it
//! shows the check's current settings.

use std::path::{Path, PathBuf};

use crate::check::{FormValues, Severity};
use crate::cli::args::ConfigureArgs;
use crate::error::{AuditError, Result};
use crate::ui::UserInterface;

use super::context::AuditContext;
use super::dispatcher::{Command, CommandResult};

/// Parse repeated `FIELD=VALUE` pairs. Repeating a field appends a line.
pub fn parse_fields(pairs: &[String]) -> Result<FormValues> {
    let mut values = FormValues::new();
    for pair in pairs {
        let (field, value) =
            pair.split_once('=')
                .ok_or_else(|| AuditError::ConfigValidationError {
                    message: format!("Expected FIELD=VALUE, got '{}'", pair),
                })?;
        values
            .entry(field.trim().to_string())
            .and_modify(|existing: &mut String| {
                existing.push('\n');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    Ok(values)
}

/// The configure command implementation.
pub struct ConfigureCommand {
    project_root: PathBuf,
    args: ConfigureArgs,
}

impl ConfigureCommand {
    pub fn new(project_root: &Path, args: ConfigureArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn has_changes(&self) -> bool {
        self.args.enable
            || self.args.disable
            || self.args.severity.is_some()
            || !self.args.fields.is_empty()
    }

    fn show(&self, ctx: &AuditContext, ui: &mut dyn UserInterface) -> Result<()> {
        let id = self.args.id.as_str();
        let definition = ctx.runner.definition(id)?;
        ui.show_header(&definition.label, None);
        ui.message(&format!("  enabled: {}", definition.enabled));
        ui.message(&format!("  severity: {}", definition.severity));

        let check = ctx.runner.registry().get(id)?;
        if let Some(form) = check.configurable_form() {
            for field in form.form_schema() {
                ui.message(&format!("  {} ({}):", field.name, field.label));
                ui.show_detail(&field.value);
            }
        }
        Ok(())
    }
}

impl Command for ConfigureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = AuditContext::load(&self.project_root)?;
        let id = self.args.id.as_str();
        if !ctx.runner.registry().contains(id) {
            ui.error(&format!("Unknown check '{}'", id));
            return Ok(CommandResult::failure(2));
        }

        if !self.has_changes() {
            self.show(&ctx, ui)?;
            return Ok(CommandResult::success());
        }

        let severity = self
            .args
            .severity
            .as_deref()
            .map(str::parse::<Severity>)
            .transpose()?;

        if !self.args.fields.is_empty() {
            let values = parse_fields(&self.args.fields)?;
            let check = ctx.runner.registry().get(id)?;
            let form = check
                .configurable_form()
                .ok_or_else(|| AuditError::ConfigValidationError {
                    message: format!("Check '{}' has no settings form", id),
                })?;

            let errors = form.validate_form(&values);
            if !errors.is_empty() {
                return Err(AuditError::FormValidation {
                    check: id.to_string(),
                    errors,
                });
            }
            form.submit_form(&values)?;
            ui.success(&format!("Saved settings for {}", id));
        }

        let overrides = ctx.runner.overrides();
        if self.args.enable || self.args.disable {
            overrides.set_enabled(id, self.args.enable)?;
            ui.success(&format!(
                "{} {}",
                if self.args.enable { "Enabled" } else { "Disabled" },
                id
            ));
        }
        if let Some(severity) = severity {
            overrides.set_severity(id, severity)?;
            ui.success(&format!("Set severity of {} to {}", id, severity));
        }

        Ok(CommandResult::success())
    }
}
