//! Run command implementation.
//!
//! The `advaudit run` command executes every enabled check, saves the
//! aggregate as the last run and prints the grouped report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::check::Severity;
use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::report::ResultAggregator;
use crate::runner::{RunFilter, RunProgress, RunnerOptions};
use crate::state::LastRun;
use crate::ui::UserInterface;

use super::context::AuditContext;
use super::dispatcher::{Command, CommandResult};
use super::display::show_snapshot;

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn filter(&self) -> Result<RunFilter> {
        let mut filter = RunFilter::all();
        for category in &self.args.categories {
            filter = filter.category(category.as_str());
        }
        for severity in &self.args.severities {
            filter = filter.severity(severity.parse::<Severity>()?);
        }
        Ok(filter)
    }

    fn options(&self, ctx: &AuditContext) -> RunnerOptions {
        let mut options = RunnerOptions::from_settings(&ctx.config.settings);
        if let Some(workers) = self.args.workers {
            options = options.with_workers(workers);
        }
        if let Some(secs) = self.args.timeout {
            options = options.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        options
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let filter = self.filter()?;
        let ctx = AuditContext::load(&self.project_root)?;
        let runner = ctx.runner.clone().with_options(self.options(&ctx));

        let mut results = ResultAggregator::new();
        runner.run_all_with_progress(&filter, &mut results, |progress| {
            if let RunProgress::Starting { id, index, total } = progress {
                if !self.args.json {
                    ui.show_progress(index + 1, total, id.as_str());
                }
            }
        });

        if results.is_empty() {
            ui.warning("No checks matched");
        }

        // A filtered run only refreshes the checks it ran.
        let mut last_run = if filter == RunFilter::all() {
            LastRun::new(ResultAggregator::new())
        } else {
            LastRun::load(&self.project_root)?
        };
        last_run.merge(results.clone());
        last_run.save(&self.project_root)?;

        let snapshot = results.snapshot(runner.messages());
        if self.args.json {
            ui.emit(&snapshot.to_json().map_err(anyhow::Error::from)?);
        } else {
            show_snapshot(ui, &snapshot);
        }

        Ok(match snapshot.exit_code() {
            0 => CommandResult::success(),
            code => CommandResult::failure(code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::AuditStatus;
    use crate::checks::{backend_cache, js_css_aggregation, release_notes};
    use crate::error::AuditError;
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

    const HEALTHY: &str = r#"
environment:
  values:
    cache:
      default: cache.backend.redis
    system:
      performance:
        css: { preprocess: true }
        js: { preprocess: true }
checks:
  imageapi_optimize_check:
    enabled: false
"#;

    #[test]
    fn healthy_project_exits_zero_and_saves_last_run() {
        let temp = project(HEALTHY);
        let mut ui = MockUI::new();
        let result = RunCommand::new(temp.path(), RunArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        let last_run = LastRun::load(temp.path()).unwrap();
        assert!(last_run.results.get(backend_cache::ID).is_some());
        assert!(last_run.results.get("imageapi_optimize_check").is_none());
        // patched_modules is skipped: no hacked module, no report
        assert!(ui
            .checks()
            .iter()
            .any(|(status, label, _)| *status == AuditStatus::Skip && label == "Patched modules"));
    }

    #[test]
    fn failing_check_exits_one() {
        let temp = project("{}");
        let mut ui = MockUI::new();
        let args = RunArgs {
            categories: vec!["performance".into()],
            ..RunArgs::default()
        };
        let result = RunCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("failed"));
        assert!(ui.headers().iter().all(|(category, _)| category == "performance"));
    }

    #[test]
    fn json_output_is_a_snapshot() {
        let temp = project(HEALTHY);
        let mut ui = MockUI::new();
        let args = RunArgs {
            categories: vec!["performance".into()],
            json: true,
            ..RunArgs::default()
        };
        RunCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.emitted()).unwrap();
        assert_eq!(json["status"], "pass");
        assert_eq!(json["categories"][0]["category"], "performance");
        assert_eq!(
            json["categories"][0]["entries"][1]["check_id"],
            js_css_aggregation::ID
        );
        assert!(ui.progress().is_empty());
    }

    #[test]
    fn filtered_run_keeps_other_results() {
        let temp = project(HEALTHY);
        let mut ui = MockUI::new();
        RunCommand::new(temp.path(), RunArgs::default())
            .execute(&mut ui)
            .unwrap();

        let args = RunArgs {
            categories: vec!["performance".into()],
            ..RunArgs::default()
        };
        RunCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        let last_run = LastRun::load(temp.path()).unwrap();
        assert!(last_run.results.get(release_notes::ID).is_some());
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let temp = project("{}");
        let args = RunArgs {
            severities: vec!["urgent".into()],
            ..RunArgs::default()
        };
        let err = RunCommand::new(temp.path(), args)
            .execute(&mut MockUI::new())
            .unwrap_err();
        assert!(matches!(err, AuditError::InvalidSeverity { .. }));
    }
}
