//! Module/feature existence probe.

use std::collections::BTreeSet;

/// Answers whether a named module or feature is available.
pub trait ModuleProbe: Send + Sync {
    fn exists(&self, name: &str) -> anyhow::Result<bool>;
}

/// Probe over a fixed list of module names.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleProbe {
    modules: BTreeSet<String>,
}

impl StaticModuleProbe {
    /// Create a probe reporting exactly these modules as present.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Names known to this probe.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }
}

impl ModuleProbe for StaticModuleProbe {
    fn exists(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.modules.contains(name))
    }
}
