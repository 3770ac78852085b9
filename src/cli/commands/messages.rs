//! Messages command implementation.
//!
//! `advaudit messages get <ID> <TYPE>` prints the effective text;
//! `advaudit messages set <ID> <TYPE> <TEXT>` stores an override, and an
//! empty text restores the compiled default.

use std::path::{Path, PathBuf};

use crate::cli::args::{MessagesAction, MessagesArgs};
use crate::error::{AuditError, Result};
use crate::messages::MessageType;
use crate::ui::UserInterface;

use super::context::AuditContext;
use super::dispatcher::{Command, CommandResult};

/// The messages command implementation.
pub struct MessagesCommand {
    project_root: PathBuf,
    args: MessagesArgs,
}

impl MessagesCommand {
    pub fn new(project_root: &Path, args: MessagesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for MessagesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = AuditContext::load(&self.project_root)?;
        let id = match &self.args.action {
            MessagesAction::Get { id, .. } | MessagesAction::Set { id, .. } => id,
        };
        if let Err(AuditError::UnknownCheck { id }) = ctx.runner.definition(id) {
            ui.error(&format!("Unknown check '{}'", id));
            return Ok(CommandResult::failure(2));
        }

        let messages = ctx.runner.messages();
        match &self.args.action {
            MessagesAction::Get { id, kind } => {
                let kind: MessageType = kind.parse()?;
                ui.emit(&messages.get(id, kind));
            }
            MessagesAction::Set { id, kind, text } => {
                messages.set_named(id, kind, text)?;
                if text.is_empty() {
                    ui.success(&format!("Restored default {} message for {}", kind, id));
                } else {
                    ui.success(&format!("Updated {} message for {}", kind, id));
                }
            }
        }
        Ok(CommandResult::success())
    }
}
