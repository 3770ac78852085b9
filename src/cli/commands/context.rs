//! Shared bootstrap for commands.
//!
//! Loads the project config, builds the environment collaborators and the
//! registry of built-in checks, then wires the runner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::check::CheckRegistry;
use crate::checks;
use crate::config::{load_config, AuditConfig, CheckOverrides};
use crate::environment::{
    AuditEnvironment, FilePatchReport, FileStore, KeyValueStore, StaticModuleProbe, YamlSettings,
};
use crate::error::Result;
use crate::messages::MessageStore;
use crate::runner::{AuditRunner, RunnerOptions};

/// Everything a command needs to audit a project.
pub struct AuditContext {
    pub project_root: PathBuf,
    pub config: AuditConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub runner: AuditRunner,
}

impl AuditContext {
    /// Bootstrap from the project's config files.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config = load_config(project_root)?;
        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(&resolve(project_root, &config.settings.store))?);

        let env = AuditEnvironment::new(
            Arc::new(YamlSettings::new(config.environment.values.clone())),
            Arc::new(StaticModuleProbe::new(
                config.environment.modules.iter().map(String::as_str),
            )),
            Arc::clone(&store),
            resolve(project_root, &config.environment.root),
        );
        let patch_reports = Arc::new(FilePatchReport::new(
            config
                .environment
                .patch_report
                .as_ref()
                .map(|path| resolve(project_root, path)),
        ));

        let registry: Arc<CheckRegistry> =
            Arc::new(checks::builtin_registry(env, patch_reports)?);
        let messages = MessageStore::new(Arc::clone(&store)).with_defaults(registry.definitions());
        let overrides =
            CheckOverrides::from_config(config.checks.clone()).with_store(Arc::clone(&store));
        let runner = AuditRunner::new(registry, messages)
            .with_overrides(overrides)
            .with_options(RunnerOptions::from_settings(&config.settings));

        debug!(root = %project_root.display(), "Audit context ready");
        Ok(Self {
            project_root: project_root.to_path_buf(),
            config,
            store,
            runner,
        })
    }
}

fn resolve(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
