//! Application layer for promptkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PromptEngine, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Engine and loader error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Template rules and variable checks live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{DEFAULT_OUTPUT_KEY, PromptEngine, RenderHistory, TemplateService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    SubstitutionEngine, SubstitutionError, SubstitutionErrorKind, TemplateLoader, TemplateStore,
};

pub use error::{EngineError, LoaderError};
