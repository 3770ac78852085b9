//! Configuration loading, parsing, and validation for advaudit.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Overlay merging in [`merger`]
//! - Validation in [`validator`]
//! - Effective per-check enabled/severity in [`overrides`]
//!
//! # Example
//!
//! ```
//! use advaudit::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".advaudit");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  workers: 2\n").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert_eq!(config.settings.workers, 2);
//! ```

pub mod loader;
pub mod merger;
pub mod overrides;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_layers};
pub use overrides::CheckOverrides;
pub use schema::{AuditConfig, CheckOverride, EnvironmentConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
