//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, AuditTheme, OutputMode, UserInterface};
use crate::check::AuditStatus;
use crate::report::CategoryStatus;

/// Styled line output on stdout.
pub struct TerminalUI {
    term: Term,
    theme: AuditTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            AuditTheme::new()
        } else {
            AuditTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str, status: Option<CategoryStatus>) {
        writeln!(self.term, "\n{}", self.theme.format_header(title, status)).ok();
    }

    fn show_progress(&mut self, current: usize, total: usize, label: &str) {
        if self.mode.shows_progress() {
            writeln!(
                self.term,
                "{}",
                self.theme
                    .dim
                    .apply_to(format!("[{}/{}] {}", current, total, label))
            )
            .ok();
        }
    }

    fn show_check(&mut self, status: AuditStatus, label: &str, detail: &str) {
        if status != AuditStatus::Fail && !self.mode.shows_passing() {
            return;
        }
        let line = if detail.is_empty() {
            label.to_string()
        } else {
            format!("{}: {}", label, detail)
        };
        writeln!(self.term, "  {}", self.theme.format_status(status, &line)).ok();
    }

    fn show_detail(&mut self, text: &str) {
        for line in text.lines() {
            writeln!(self.term, "      {}", self.theme.dim.apply_to(line)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.term, "{}", self.theme.hint.apply_to(hint)).ok();
    }

    fn emit(&mut self, data: &str) {
        writeln!(self.term, "{}", data).ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the terminal UI for the given mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
