//! Shared display helpers for report entries.
//!
//! Used by `run` and `check` so both render entries the same way.

use crate::check::AuditStatus;
use crate::report::{AuditSnapshot, ReportEntry, Summary};
use crate::ui::UserInterface;

/// Text shown next to the label: the status message, or the reason when
/// there is none (skips).
pub fn headline(entry: &ReportEntry) -> &str {
    if entry.message.is_empty() {
        &entry.reason
    } else {
        &entry.message
    }
}

/// Print one entry with its details.
pub fn show_entry(ui: &mut dyn UserInterface, entry: &ReportEntry) {
    let headline = headline(entry);
    ui.show_check(entry.status, &entry.label, headline);

    if entry.status != AuditStatus::Fail {
        return;
    }
    if !entry.details.is_empty() && entry.details != headline {
        ui.show_detail(&entry.details);
    } else if !entry.reason.is_empty() && entry.reason != headline {
        ui.show_detail(&entry.reason);
    }
    if ui.output_mode().shows_details() {
        if !entry.action.is_empty() {
            ui.show_detail(&format!("Action: {}", entry.action));
        }
        if !entry.impact.is_empty() {
            ui.show_detail(&format!("Impact: {}", entry.impact));
        }
    }
}

/// Print every category with its entries, then the summary.
pub fn show_snapshot(ui: &mut dyn UserInterface, snapshot: &AuditSnapshot) {
    for category in &snapshot.categories {
        ui.show_header(&category.category, Some(category.status));
        for entry in &category.entries {
            show_entry(ui, entry);
        }
    }
    ui.message("");
    show_summary(ui, &snapshot.summary);
}

/// One-line count of passed/failed/skipped checks.
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "{} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    )
}

pub fn show_summary(ui: &mut dyn UserInterface, summary: &Summary) {
    let line = summary_line(summary);
    if summary.failed > 0 {
        ui.error(&line);
    } else {
        ui.success(&line);
    }
}
