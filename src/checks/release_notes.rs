//! Stray release notes and help files on the server.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::check::{
    AuditReason, Check, CheckContext, CheckDefinition, ConfigurableForm, FieldKind, FormField,
    FormValues, Severity,
};
use crate::environment::KeyValueStore;
use crate::messages::MessageType;

pub const ID: &str = "release_notes_help_files";

/// Form field holding one relative path per line.
pub const FILES_FIELD: &str = "files";

pub const DEFAULT_FILES: [&str; 12] = [
    "core/CHANGELOG.txt",
    "core/COPYRIGHT.txt",
    "core/INSTALL.mysql.txt",
    "core/INSTALL.pgsql.txt",
    "core/INSTALL.sqlite.txt",
    "core/INSTALL.txt",
    "core/LICENSE.txt",
    "core/MAINTAINERS.txt",
    "README.txt",
    "core/UPGRADE.txt",
    "themes/README.txt",
    "modules/README.txt",
];

pub fn definition() -> CheckDefinition {
    CheckDefinition::new(
        ID,
        "Release notes & help files",
        "server_configuration",
        Severity::Critical,
    )
        .with_message(
            MessageType::Description,
            "Release notes and help files reveal the exact version of the application to anyone who requests them.",
        )
        .with_message(
            MessageType::Action,
            "Remove the listed files from the web root or deny access to them.",
        )
        .with_message(
            MessageType::Impact,
            "Attackers use version information to pick known vulnerabilities.",
        )
        .with_message(MessageType::FailMessage, "Files found on server: ${files}")
        .with_message(MessageType::SuccessMessage, "No release notes or help files found.")
}

/// Storage key for the configured file list.
pub fn files_key() -> String {
    format!("plugin.{}.config.{}", ID, FILES_FIELD)
}

/// Fails if any configured file exists under the application root.
pub struct ReleaseNotesHelpFiles {
    root: PathBuf,
    store: Arc<dyn KeyValueStore>,
}

impl ReleaseNotesHelpFiles {
    pub fn new(ctx: &CheckContext<'_>) -> Self {
        Self {
            root: ctx.env.root.clone(),
            store: Arc::clone(&ctx.env.store),
        }
    }

    fn stored_files(&self) -> anyhow::Result<Option<String>> {
        Ok(self.store.get(&files_key())?.filter(|v| !v.trim().is_empty()))
    }

    /// Configured files, or the defaults when none are stored.
    pub fn files(&self) -> anyhow::Result<Vec<String>> {
        let files = self
            .stored_files()?
            .map(|text| parse_lines(&text))
            .unwrap_or_default();
        if files.is_empty() {
            return Ok(DEFAULT_FILES.iter().map(|f| f.to_string()).collect());
        }
        Ok(files)
    }
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches('/'))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn escapes_root(path: &str) -> bool {
    Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}

impl Check for ReleaseNotesHelpFiles {
    fn perform(&self) -> anyhow::Result<AuditReason> {
        let remaining: Vec<String> = self
            .files()?
            .into_iter()
            .filter(|file| self.root.join(file).exists())
            .collect();

        if remaining.is_empty() {
            return Ok(AuditReason::pass(ID));
        }

        let issues: Vec<String> = remaining
            .iter()
            .map(|file| format!("File on server: {}", file))
            .collect();
        Ok(AuditReason::fail(ID)
            .with_reason(format!("{} release note/help file(s) present", remaining.len()))
            .with_argument("issues", issues)
            .with_argument("files", remaining))
    }

    fn configurable_form(&self) -> Option<&dyn ConfigurableForm> {
        Some(self)
    }
}

impl ConfigurableForm for ReleaseNotesHelpFiles {
    fn form_schema(&self) -> Vec<FormField> {
        let value = match self.stored_files() {
            Ok(Some(text)) => text,
            _ => DEFAULT_FILES.join("\n"),
        };
        vec![FormField {
            name: FILES_FIELD.to_string(),
            label: "Files for checking".to_string(),
            description: "One path per line, relative to the application root, e.g. path/to/file."
                .to_string(),
            kind: FieldKind::Textarea,
            value,
        }]
    }

    fn validate_form(&self, values: &FormValues) -> Vec<String> {
        let mut errors: Vec<String> = values
            .keys()
            .filter(|name| name.as_str() != FILES_FIELD)
            .map(|name| format!("Unknown field '{}'", name))
            .collect();

        if let Some(text) = values.get(FILES_FIELD) {
            errors.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .filter(|line| escapes_root(line.trim_start_matches('/')))
                    .map(|line| format!("Path '{}' must stay inside the application root", line)),
            );
        }
        errors
    }

    fn submit_form(&self, values: &FormValues) -> anyhow::Result<()> {
        match values.get(FILES_FIELD) {
            Some(text) if !text.trim().is_empty() => {
                self.store.set(&files_key(), &parse_lines(text).join("\n"))
            }
            Some(_) => self.store.remove(&files_key()),
            None => Ok(()),
        }
    }
}
