//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use super::{OutputMode, UserInterface};
use crate::check::AuditStatus;
use crate::report::CategoryStatus;

/// Captures all UI interactions.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<(String, Option<CategoryStatus>)>,
    progress: Vec<(usize, usize, String)>,
    checks: Vec<(AuditStatus, String, String)>,
    details: Vec<String>,
    hints: Vec<String>,
    emitted: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Captured headers as (title, status).
    pub fn headers(&self) -> &[(String, Option<CategoryStatus>)] {
        &self.headers
    }

    pub fn progress(&self) -> &[(usize, usize, String)] {
        &self.progress
    }

    /// Captured check lines as (status, label, detail).
    pub fn checks(&self) -> &[(AuditStatus, String, String)] {
        &self.checks
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Everything written through `emit`, joined by newlines.
    pub fn emitted(&self) -> String {
        self.emitted.join("\n")
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str, status: Option<CategoryStatus>) {
        self.headers.push((title.to_string(), status));
    }

    fn show_progress(&mut self, current: usize, total: usize, label: &str) {
        self.progress.push((current, total, label.to_string()));
    }

    fn show_check(&mut self, status: AuditStatus, label: &str, detail: &str) {
        self.checks
            .push((status, label.to_string(), detail.to_string()));
    }

    fn show_detail(&mut self, text: &str) {
        self.details.push(text.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn emit(&mut self, data: &str) {
        self.emitted.push(data.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Failed");

        assert!(ui.has_message("Hello"));
        assert!(ui.has_success("Done"));
        assert!(ui.has_warning("Careful"));
        assert!(ui.has_error("Failed"));
    }

    #[test]
    fn mock_ui_captures_checks_and_headers() {
        let mut ui = MockUI::new();
        ui.show_header("performance", Some(CategoryStatus::Pass));
        ui.show_check(AuditStatus::Pass, "Aggregation", "");

        assert_eq!(ui.headers()[0].0, "performance");
        assert_eq!(ui.checks()[0].0, AuditStatus::Pass);
    }

    #[test]
    fn emitted_output_is_joined() {
        let mut ui = MockUI::new();
        ui.emit("{");
        ui.emit("}");
        assert_eq!(ui.emitted(), "{\n}");
    }
}
