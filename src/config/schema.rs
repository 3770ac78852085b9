//! Configuration schema for `.advaudit/config.yml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Runner and storage settings
    pub settings: Settings,

    /// Facts about the audited application
    pub environment: EnvironmentConfig,

    /// Per-check enabled/severity overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub checks: BTreeMap<String, CheckOverride>,
}

/// Runner and storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-check timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of checks evaluated concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Key-value store file, relative to the project root
    #[serde(default = "default_store")]
    pub store: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            workers: default_workers(),
            store: default_store(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_workers() -> usize {
    1
}

fn default_store() -> PathBuf {
    PathBuf::from(".advaudit").join("store.yml")
}

/// The audited application as seen by checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Enabled modules reported by the module probe
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,

    /// Settings tree served by the settings provider
    #[serde(skip_serializing_if = "serde_yaml::Value::is_null")]
    pub values: serde_yaml::Value,

    /// Application root, relative to the project root
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Generated patch report consumed by the patched-modules check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_report: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            values: serde_yaml::Value::Null,
            root: default_root(),
            patch_report: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Configuration override for one check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// One of `critical`, `high`, `low`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}
