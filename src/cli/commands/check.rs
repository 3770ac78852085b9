//! Check command implementation.
//!
//! The `advaudit check <ID>` command re-runs one check and merges its record
//! into the last run, leaving the other records untouched.

use std::path::{Path, PathBuf};

use crate::check::AuditStatus;
use crate::cli::args::CheckArgs;
use crate::error::{AuditError, Result};
use crate::state::LastRun;
use crate::ui::UserInterface;

use super::context::AuditContext;
use super::dispatcher::{Command, CommandResult};
use super::display::show_entry;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = AuditContext::load(&self.project_root)?;
        let record = match ctx.runner.run_one(&self.args.id) {
            Ok(record) => record,
            Err(AuditError::UnknownCheck { id }) => {
                ui.error(&format!("Unknown check '{}'", id));
                ui.show_hint("Run 'advaudit list' to see available checks.");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let mut last_run = LastRun::load(&self.project_root)?;
        last_run.results.merge(record);
        last_run.save(&self.project_root)?;

        let snapshot = last_run.results.snapshot(ctx.runner.messages());
        let Some(entry) = snapshot.entry(&self.args.id) else {
            return Ok(CommandResult::failure(1));
        };

        if self.args.json {
            ui.emit(&serde_json::to_string_pretty(entry).map_err(anyhow::Error::from)?);
        } else {
            show_entry(ui, entry);
        }

        Ok(if entry.status == AuditStatus::Fail {
            CommandResult::failure(1)
        } else {
            CommandResult::success()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{backend_cache, js_css_aggregation};
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

    fn args(id: &str) -> CheckArgs {
        CheckArgs {
            id: id.to_string(),
            json: false,
        }
    }

    #[test]
    fn unknown_check_exits_two() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        let result = CheckCommand::new(temp.path(), args("nope"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Unknown check 'nope'"));
    }

    #[test]
    fn merges_into_last_run() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        CheckCommand::new(temp.path(), args(backend_cache::ID))
            .execute(&mut ui)
            .unwrap();
        CheckCommand::new(temp.path(), args(js_css_aggregation::ID))
            .execute(&mut ui)
            .unwrap();

        let last_run = LastRun::load(temp.path()).unwrap();
        assert_eq!(last_run.results.len(), 2);
        assert_eq!(ui.checks()[0].0, AuditStatus::Fail);
    }

    #[test]
    fn rerun_replaces_previous_record() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        CheckCommand::new(temp.path(), args(backend_cache::ID))
            .execute(&mut ui)
            .unwrap();

        fs::write(
            temp.path().join(".advaudit/config.yml"),
            "environment:\n  values:\n    cache:\n      default: cache.backend.memcache\n",
        )
        .unwrap();
        let result = CheckCommand::new(temp.path(), args(backend_cache::ID))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        let last_run = LastRun::load(temp.path()).unwrap();
        assert_eq!(last_run.results.len(), 1);
        assert!(last_run.results.get(backend_cache::ID).unwrap().reason.is_pass());
    }

    #[test]
    fn json_prints_the_entry() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        let args = CheckArgs {
            id: backend_cache::ID.to_string(),
            json: true,
        };
        CheckCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.emitted()).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["reason"], "cache backend is database");
        assert_eq!(json["message"], "The default cache backend is database.");
    }
}
