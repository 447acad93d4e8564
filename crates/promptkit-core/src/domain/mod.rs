// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for promptkit.
//!
//! Pure data and rules: template construction, variable mappings, required
//! variable checks and render records. Substitution itself is not done here;
//! it sits behind the `SubstitutionEngine` port in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem or network access
//! - **Immutable entities**: templates cannot change after `build()`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    render_record::RenderRecord,
    template::{
        DESCRIPTION_MAX_LEN, NAME_MAX_LEN, PromptTemplate, TemplateBuilder, TemplateRecord,
    },
};

pub use error::{SchemaError, ValidationError};

pub use value_objects::{Record, Value, Variables};

pub use validation::VariableValidator;
