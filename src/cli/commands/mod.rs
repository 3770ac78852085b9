//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`]; each one bootstraps
//! through [`AuditContext`] so config, store and registry are wired the
//! same way everywhere.

pub mod check;
pub mod configure;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod list;
pub mod messages;
pub mod run;

pub use context::AuditContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
