//! Error types for advaudit operations.
//!
//! This module defines [`AuditError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `AuditError` for domain errors that callers handle distinctly
//! - Collaborators and check bodies return `anyhow::Result`; their failures
//!   are wrapped into `Environment` / `CheckExecutionFault` diagnostics and
//!   never abort a run
//! - Only bootstrap errors (`DuplicateRegistration`, bad config) are fatal

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for advaudit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Requested check id is not registered.
    #[error("Unknown check: {id}")]
    UnknownCheck { id: String },

    /// Two definitions share the same id.
    #[error("Check '{id}' is registered more than once")]
    DuplicateRegistration { id: String },

    /// Severity string is not one of critical, high, low.
    #[error("Invalid severity '{value}' (expected critical, high or low)")]
    InvalidSeverity { value: String },

    /// Message kind is not one of the five known types.
    #[error("Invalid message type '{value}' (expected description, action, impact, fail or success)")]
    InvalidMessageType { value: String },

    /// Requirement evaluation itself failed (collaborator unavailable).
    #[error("Requirements of '{check}' could not be evaluated: {message}")]
    Environment { check: String, message: String },

    /// A fault escaped a check's `perform`.
    #[error("Check '{check}' failed to execute: {message}")]
    CheckExecutionFault { check: String, message: String },

    /// A check did not finish within the configured timeout.
    #[error("Check '{check}' timed out after {timeout_ms}ms")]
    CheckTimedOut { check: String, timeout_ms: u128 },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or state file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Submitted check settings were rejected by the check's form.
    #[error("Invalid settings for '{check}': {}", .errors.join("; "))]
    FormValidation { check: String, errors: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for advaudit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
