//! Error types and handling for appstamp
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every pipeline stage fails fast: the first error encountered aborts the
//! installation and is propagated unchanged to `main`. There is no retry and
//! no rollback; a partially written destination tree is left as-is.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for appstamp operations
#[derive(Error, Diagnostic, Debug)]
pub enum AppstampError {
    // Template errors
    #[error("Template not found at: {path}")]
    #[diagnostic(
        code(appstamp::template::not_found),
        help("Check that the templates directory exists, or set APPSTAMP_TEMPLATES_DIR")
    )]
    TemplateNotFound { path: String },

    // File system errors
    #[error("Failed to copy file: {path}")]
    #[diagnostic(code(appstamp::fs::copy_failed))]
    FileCopyFailed { path: String, reason: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(appstamp::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(appstamp::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    // Content rewrite errors
    #[error("Failed to rewrite import alias in: {path}")]
    #[diagnostic(code(appstamp::rewrite::alias_failed))]
    AliasRewriteFailed { path: String, reason: String },

    // Layout adjustment errors
    #[error("Failed to move '{path}' into src/")]
    #[diagnostic(code(appstamp::layout::move_failed))]
    LayoutMoveFailed { path: String, reason: String },

    // Manifest errors
    #[error("Failed to write package manifest: {path}")]
    #[diagnostic(code(appstamp::manifest::write_failed))]
    ManifestWriteFailed { path: String, reason: String },

    // Installer errors
    #[error("Installation command failed: {command}")]
    #[diagnostic(
        code(appstamp::install::command_failed),
        help("Check the installer output above for the underlying failure")
    )]
    InstallCommandFailed { command: String },

    // Project validation errors
    #[error("Invalid project name: {name}")]
    #[diagnostic(
        code(appstamp::project::invalid_name),
        help("Project names must follow npm package naming restrictions")
    )]
    InvalidProjectName { name: String, problems: Vec<String> },

    #[error("Destination directory is not empty: {path}")]
    #[diagnostic(
        code(appstamp::project::destination_not_empty),
        help("Either use a new directory name, or remove the conflicting files")
    )]
    DestinationNotEmpty { path: String },

    // Preference store errors
    #[error("Failed to access preferences: {reason}")]
    #[diagnostic(code(appstamp::preferences::failed))]
    PreferencesFailed { reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(appstamp::fs::io_error))]
    IoError { message: String },
}

impl AppstampError {
    /// The external command carried by an [`AppstampError::InstallCommandFailed`], if any.
    ///
    /// `main` prints this so the user sees exactly which invocation failed.
    pub fn failed_command(&self) -> Option<&str> {
        match self {
            AppstampError::InstallCommandFailed { command } => Some(command),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppstampError {
    fn from(err: std::io::Error) -> Self {
        AppstampError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for AppstampError {
    fn from(err: inquire::InquireError) -> Self {
        AppstampError::IoError {
            message: err.to_string(),
        }
    }
}

// Convenience constructors used throughout the installer pipeline
pub fn copy_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::FileCopyFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn file_read_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn file_write_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn alias_rewrite_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::AliasRewriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn layout_move_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::LayoutMoveFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn manifest_write_failed(path: &Path, reason: impl ToString) -> AppstampError {
    AppstampError::ManifestWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AppstampError>;
