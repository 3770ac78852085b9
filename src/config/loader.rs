//! Configuration file discovery and loading.
//!
//! Merge order (later overrides earlier):
//! 1. Project config (`.advaudit/config.yml`)
//! 2. Local overrides (`.advaudit/config.local.yml`)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::merger::merge_layers;
use crate::config::schema::AuditConfig;
use crate::config::validator::validate;
use crate::error::{AuditError, Result};

/// Directory holding config, store and last-run files.
pub const CONFIG_DIR: &str = ".advaudit";

/// Paths to the config files of a project.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .advaudit/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .advaudit/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let existing = |name: &str| {
            let path = project_root.join(CONFIG_DIR).join(name);
            path.exists().then_some(path)
        };
        Self {
            project: existing("config.yml"),
            project_local: existing("config.local.yml"),
        }
    }

    /// All existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Whether any config file exists.
    pub fn has_any(&self) -> bool {
        self.project.is_some() || self.project_local.is_some()
    }
}

/// Find the project root by walking up from `start`.
///
/// A `.advaudit` directory wins over a `.git` directory at the same or a
/// higher level.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file as a raw YAML value.
///
/// An empty file is an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AuditError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AuditError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| AuditError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file without overlays.
pub fn load_config_file(path: &Path) -> Result<AuditConfig> {
    let value = load_config_value(path)?;
    let config = parse_value(value, path)?;
    validate(&config)?;
    Ok(config)
}

/// Load and merge the project's config files.
///
/// A project without config files gets [`AuditConfig::default`].
pub fn load_config(project_root: &Path) -> Result<AuditConfig> {
    let paths = ConfigPaths::discover(project_root);
    if !paths.has_any() {
        debug!(root = %project_root.display(), "No config found, using defaults");
        return Ok(AuditConfig::default());
    }

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    let config = parse_value(
        merge_layers(&layers),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )?;
    validate(&config)?;
    Ok(config)
}

fn parse_value(value: serde_yaml::Value, path: &Path) -> Result<AuditConfig> {
    serde_yaml::from_value(value).map_err(|e| AuditError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
