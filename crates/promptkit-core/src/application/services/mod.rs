//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "render a prompt" or "load a template folder".

pub mod engine;
pub mod history;
pub mod template_service;

pub use engine::{DEFAULT_OUTPUT_KEY, PromptEngine};
pub use history::RenderHistory;
pub use template_service::TemplateService;
