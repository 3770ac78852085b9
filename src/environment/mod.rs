//! Collaborators the audit core consumes but does not own.
//!
//! Components receive these explicitly through [`AuditEnvironment`]; there
//! are no global singletons.
//!
//! - [`settings`] - Read-only settings lookup (`get(path)`)
//! - [`probe`] - Module/feature existence probe (`exists(name)`)
//! - [`store`] - Persistent key-value store backing messages and overrides
//! - [`patch_report`] - External report of locally modified projects

pub mod patch_report;
pub mod probe;
pub mod settings;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use patch_report::{
    FilePatchReport, PatchCounts, PatchReport, PatchReportSource, PatchedProject,
};
pub use probe::{ModuleProbe, StaticModuleProbe};
pub use settings::{SettingsProvider, YamlSettings};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// The set of collaborators handed to checks, the gate and the message store.
#[derive(Clone)]
pub struct AuditEnvironment {
    pub settings: Arc<dyn SettingsProvider>,
    pub modules: Arc<dyn ModuleProbe>,
    pub store: Arc<dyn KeyValueStore>,
    /// Filesystem root of the audited application.
    pub root: PathBuf,
}

impl AuditEnvironment {
    /// Bundle collaborators.
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        modules: Arc<dyn ModuleProbe>,
        store: Arc<dyn KeyValueStore>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            settings,
            modules,
            store,
            root: root.into(),
        }
    }

    /// Empty settings, no modules, in-memory store, current directory root.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(YamlSettings::default()),
            Arc::new(StaticModuleProbe::default()),
            Arc::new(MemoryStore::new()),
            ".",
        )
    }

    /// Replace the settings provider.
    pub fn with_settings(mut self, settings: Arc<dyn SettingsProvider>) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the module probe.
    pub fn with_modules(mut self, modules: Arc<dyn ModuleProbe>) -> Self {
        self.modules = modules;
        self
    }

    /// Replace the key-value store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the application root.
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }
}

impl std::fmt::Debug for AuditEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditEnvironment")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
