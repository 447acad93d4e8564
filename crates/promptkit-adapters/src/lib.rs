//! Infrastructure adapters for promptkit.
//!
//! This crate implements the ports defined in `promptkit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use renderer::TeraRenderer;
pub use template_loader::FileTemplateLoader;
pub use template_store::InMemoryStore;
