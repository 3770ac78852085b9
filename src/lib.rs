//! advaudit - Pluggable environment audit checklist runner.
//!
//! Checks are registered once with static metadata and a factory, gated on
//! declared requirements, executed in isolation and aggregated into a
//! per-category report.
//!
//! # Modules
//!
//! - [`check`] - Check model: definitions, results, capabilities, registry
//! - [`checks`] - Built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, validation and overrides
//! - [`environment`] - Settings, module probe, key-value store, patch report
//! - [`error`] - Error types and result aliases
//! - [`messages`] - Per-check messages with persisted overrides
//! - [`report`] - Result aggregation and report snapshots
//! - [`requirements`] - The requirements gate
//! - [`runner`] - Check execution with isolation and timeouts
//! - [`state`] - The persisted last run
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use advaudit::check::CheckRegistry;
//! use advaudit::checks;
//! use advaudit::environment::{AuditEnvironment, FilePatchReport};
//! use advaudit::messages::MessageStore;
//! use advaudit::runner::AuditRunner;
//!
//! let env = AuditEnvironment::in_memory();
//! let store = Arc::clone(&env.store);
//! let registry = checks::builtin_registry(env, Arc::new(FilePatchReport::new(None))).unwrap();
//! let messages = MessageStore::new(store).with_defaults(registry.definitions());
//! let runner = AuditRunner::new(Arc::new(registry), messages);
//!
//! let record = runner.run_one("backend_cache_settings").unwrap();
//! assert!(record.reason.is_fail());
//! assert_eq!(record.reason.reason_text(), "cache backend is database");
//! ```

pub mod check;
pub mod checks;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod messages;
pub mod report;
pub mod requirements;
pub mod runner;
pub mod state;
pub mod ui;

pub use error::{AuditError, Result};
