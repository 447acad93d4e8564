//! Unified error handling for promptkit core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{EngineError, LoaderError};
use crate::domain::SchemaError;

/// Root error type for promptkit core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PromptError {
    /// A template definition violates the schema.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Rendering or chaining failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Template files could not be loaded.
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Template lookup by name failed.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Template store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PromptError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Schema(e) => e.suggestions(),
            Self::Engine(e) => e.suggestions(),
            Self::Loader(e) => e.suggestions(),
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}' is loaded", name),
                "Try: promptkit list".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in promptkit".into(),
                "Please report this issue at: https://github.com/cosecruz/promptkit/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Schema(_) => ErrorCategory::Validation,
            Self::Engine(e) => e.category(),
            Self::Loader(e) => e.category(),
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreLockError | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type PromptResult<T> = Result<T, PromptError>;
