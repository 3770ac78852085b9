//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// advaudit - Environment audit checklist runner.
#[derive(Debug, Parser)]
#[command(name = "advaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show action and impact for failing checks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show failing checks and the summary
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run all enabled checks (default if no command specified)
    Run(RunArgs),

    /// Run a single check and merge it into the last run
    Check(CheckArgs),

    /// List registered checks by category
    List(ListArgs),

    /// Read or override check messages
    Messages(MessagesArgs),

    /// Enable, disable or configure a check
    Configure(ConfigureArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Only run checks in these categories
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Only run checks with these severities (low, high, critical)
    #[arg(long = "severity", value_name = "SEVERITY")]
    pub severities: Vec<String>,

    /// Number of checks evaluated concurrently
    #[arg(long)]
    pub workers: Option<usize>,

    /// Per-check timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Check id
    pub id: String,

    /// Output the entry as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `messages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub action: MessagesAction,
}

/// `messages` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum MessagesAction {
    /// Print the effective message text
    Get {
        /// Check id
        id: String,
        /// Message type (description, action, impact, fail, success)
        kind: String,
    },
    /// Override a message; empty text restores the default
    Set {
        /// Check id
        id: String,
        /// Message type (description, action, impact, fail, success)
        kind: String,
        /// New text
        text: String,
    },
}

/// Arguments for the `configure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigureArgs {
    /// Check id
    pub id: String,

    /// Enable the check
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the check
    #[arg(long)]
    pub disable: bool,

    /// Override the severity (low, high, critical)
    #[arg(long)]
    pub severity: Option<String>,

    /// Set a form field (FIELD=VALUE, repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,
}
