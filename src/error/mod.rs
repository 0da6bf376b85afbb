// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for commit-config.
//!
//! Configuration problems are fatal and surface before any rule runs.
//! Problems inside a single rule never reach this module as an `Err` from
//! linting: they are folded into that rule's result instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for commit-config operations.
#[derive(Error, Debug)]
pub enum CcError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Commit message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown rule '{name}'")]
    UnknownRule { name: String },

    #[error("Rule '{name}' is already defined")]
    DuplicateRule { name: String },

    #[error("Invalid pattern for '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

/// Validation outcomes that end a CLI run with a failure status.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid commit message: {errors} errors, {warnings} warnings")]
    InvalidMessage { errors: usize, warnings: usize },

    #[error("{failed} of {total} commits failed validation")]
    InvalidCommits { failed: usize, total: usize },
}

/// Plugin rule errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("Plugin rule '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },
}

/// Commit message errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to read commit message from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

/// Result type alias for commit-config operations.
pub type Result<T> = std::result::Result<T, CcError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CcError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
