//! Application ports (traits) for external dependencies.
//!
//! Adapters in `promptkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SubstitutionEngine`: Placeholder substitution
//!   - `TemplateStore`: Template storage/retrieval by name
//!   - `TemplateLoader`: Reading template files
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    SubstitutionEngine, SubstitutionError, SubstitutionErrorKind, TemplateLoader, TemplateStore,
};
