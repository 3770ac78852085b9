//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing styled lines to stdout
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use advaudit::check::AuditStatus;
//! use advaudit::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_check(AuditStatus::Fail, "Memcache/Redis settings", "cache backend is database");
//! assert_eq!(ui.checks().len(), 1);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, AuditTheme};

use crate::check::AuditStatus;
use crate::report::CategoryStatus;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a category header.
    fn show_header(&mut self, title: &str, status: Option<CategoryStatus>);

    /// Show progress (e.g., "[3/7] js_css_aggregation").
    fn show_progress(&mut self, current: usize, total: usize, label: &str);

    /// Show one check line.
    fn show_check(&mut self, status: AuditStatus, label: &str, detail: &str);

    /// Show an indented detail line under a check.
    fn show_detail(&mut self, text: &str);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Write machine-readable output verbatim, regardless of mode.
    fn emit(&mut self, data: &str);

    /// Check if stdout is a terminal.
    fn is_interactive(&self) -> bool;
}
