//! Visual theme and styling.

use console::Style;

use crate::check::AuditStatus;
use crate::report::CategoryStatus;

/// Terminal styles for audit output.
#[derive(Debug, Clone)]
pub struct AuditTheme {
    /// Passing checks (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Failing checks and errors (red bold).
    pub error: Style,
    /// Skipped checks and secondary text (dim).
    pub dim: Style,
    /// Category headers (magenta bold).
    pub header: Style,
    /// Labels and other emphasized text (bold).
    pub highlight: Style,
    /// Hints (magenta dim).
    pub hint: Style,
}

impl Default for AuditTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
            highlight: Style::new().bold(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            highlight: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Icon and color for a check status.
    pub fn format_status(&self, status: AuditStatus, msg: &str) -> String {
        match status {
            AuditStatus::Pass => self.format_success(msg),
            AuditStatus::Fail => self.format_error(msg),
            AuditStatus::Skip => self.format_skipped(msg),
        }
    }

    /// Category header with its aggregate status.
    pub fn format_header(&self, title: &str, status: Option<CategoryStatus>) -> String {
        match status {
            Some(status) => format!(
                "{} {}",
                self.header.apply_to(title),
                self.dim.apply_to(format!("[{}]", status))
            ),
            None => format!("{}", self.header.apply_to(title)),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}
