//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `promptkit-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;

use crate::application::LoaderError;
use crate::domain::{PromptTemplate, Variables};
use crate::error::PromptResult;

/// Port for placeholder substitution.
///
/// Implemented by:
/// - `promptkit_adapters::renderer::TeraRenderer` (Jinja-style `{{ name }}`)
///
/// The whole variable mapping is handed to the engine, not only the declared
/// inputs. Engine-specific errors must be mapped to [`SubstitutionError`].
pub trait SubstitutionEngine: Send + Sync {
    /// Substitute `variables` into `body`.
    fn substitute(&self, body: &str, variables: &Variables) -> Result<String, SubstitutionError>;
}

/// What went wrong inside a substitution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionErrorKind {
    /// The body is not valid template syntax.
    Syntax,
    /// The body references a variable the mapping does not contain.
    UndefinedVariable,
    /// Anything else (filter failures, type errors, ...).
    Other,
}

/// Engine-neutral substitution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionError {
    pub kind: SubstitutionErrorKind,
    pub message: String,
}

impl SubstitutionError {
    pub fn new(kind: SubstitutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(SubstitutionErrorKind::Syntax, message)
    }

    pub fn undefined(message: impl Into<String>) -> Self {
        Self::new(SubstitutionErrorKind::UndefinedVariable, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(SubstitutionErrorKind::Other, message)
    }
}

impl fmt::Display for SubstitutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SubstitutionError {}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `promptkit_adapters::template_store::InMemoryStore` (built-in and loaded templates)
pub trait TemplateStore: Send + Sync {
    /// Get a template by name.
    fn get(&self, name: &str) -> PromptResult<PromptTemplate>;

    /// List all templates, sorted by name.
    fn list(&self) -> PromptResult<Vec<PromptTemplate>>;

    /// Insert or replace a template under its name.
    fn insert(&self, template: PromptTemplate) -> PromptResult<()>;

    /// Remove a template.
    fn remove(&self, name: &str) -> PromptResult<()>;

    /// Remove every template.
    fn clear(&self) -> PromptResult<()>;
}

/// Port for reading template definitions from disk.
///
/// Implemented by:
/// - `promptkit_adapters::template_loader::FileTemplateLoader` (YAML/JSON files)
pub trait TemplateLoader: Send + Sync {
    /// Load one template file.
    fn load_file(&self, path: &Path) -> Result<PromptTemplate, LoaderError>;

    /// Load every template file in a directory.
    ///
    /// Files that fail to load are skipped; only problems with the directory
    /// itself are errors.
    fn load_directory(&self, dir: &Path) -> Result<Vec<PromptTemplate>, LoaderError>;
}
