//! Application layer errors.
//!
//! These errors represent failures while rendering, chaining or loading
//! templates. Template construction errors are `SchemaError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{SchemaError, ValidationError};
use crate::error::ErrorCategory;

/// Errors produced by [`PromptEngine`](super::PromptEngine).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Declared input variables were missing or null. Raised before any
    /// substitution is attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The substitution engine rejected the body (bad syntax, reference to
    /// an undefined variable, ...).
    #[error("Error rendering template '{template}': {reason}")]
    Render { template: String, reason: String },

    /// A step of a chain failed; nothing after it ran.
    #[error("Error in prompt chain at template '{template}' (step {step}): {source}")]
    Chain {
        template: String,
        step: usize,
        #[source]
        source: Box<EngineError>,
    },

    /// The render history lock was poisoned by a panicking thread.
    #[error("Render history is unavailable")]
    HistoryUnavailable,
}

impl EngineError {
    /// Name of the template the error is about, if any.
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(&e.template),
            Self::Render { template, .. } | Self::Chain { template, .. } => Some(template),
            Self::HistoryUnavailable => None,
        }
    }

    /// The innermost error, looking through chain wrappers.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            Self::Chain { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => e.suggestions(),
            Self::Render { template, .. } => vec![
                format!("Check the placeholder syntax in '{}'", template),
                "Placeholders look like {{ variable_name }}".into(),
                "Every variable used in the body must be supplied".into(),
            ],
            Self::Chain {
                template, source, ..
            } => {
                let mut out = vec![format!("The chain stopped at '{}'", template)];
                out.extend(source.suggestions());
                out
            }
            Self::HistoryUnavailable => vec![
                "A previous render panicked while holding the history".into(),
                "Create a new engine to continue".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::Render { .. } => ErrorCategory::Validation,
            Self::Chain { source, .. } => source.category(),
            Self::HistoryUnavailable => ErrorCategory::Internal,
        }
    }
}

/// Errors produced while reading template files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoaderError {
    /// File or directory does not exist.
    #[error("Template path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A directory was expected.
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Extension is not one of `.yaml`, `.yml`, `.json`.
    #[error("Unsupported file format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// File contents are not valid YAML/JSON.
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Reading the file failed.
    #[error("Failed to read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// The decoded record is not a valid template.
    #[error("Invalid template in {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl LoaderError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::UnsupportedFormat { path, .. }
            | Self::Parse { path, .. }
            | Self::Io { path, .. }
            | Self::Schema { path, .. } => path,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { path } => vec![
                format!("Nothing exists at {}", path.display()),
                "Check the path or set [templates] dir in the config".into(),
            ],
            Self::NotADirectory { path } => vec![format!(
                "{} is a file; pass a directory or load it as a single template",
                path.display()
            )],
            Self::UnsupportedFormat { .. } => {
                vec!["Template files must end in .yaml, .yml or .json".into()]
            }
            Self::Parse { .. } => vec!["Fix the YAML/JSON syntax in the file".into()],
            Self::Io { .. } => vec!["Check that the file is readable".into()],
            Self::Schema { source, .. } => source.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Io { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}
