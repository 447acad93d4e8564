//! promptkit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for promptkit, a
//! prompt template library: validated templates, required-variable checks,
//! substitution, chaining and a render history.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          promptkit-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (PromptEngine, TemplateService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Substitution, Store, Loader)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    promptkit-adapters (Infrastructure)  │
//! │ (TeraRenderer, InMemoryStore, Loader)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PromptTemplate, Variables, Validator)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptkit_core::prelude::*;
//!
//! // 1. Build a template
//! let template = PromptTemplate::builder()
//!     .name("zero_shot_qa")
//!     .description("Simple Q&A")
//!     .body("Answer the following question: {{ question }}")
//!     .input_variable("question")
//!     .build()?;
//!
//! // 2. Render with an injected substitution engine
//! let engine = PromptEngine::new(Box::new(renderer));
//! let vars = Variables::new().with("question", "What is Rust?");
//! let text = engine.render(&template, &vars)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DEFAULT_OUTPUT_KEY, EngineError, LoaderError, PromptEngine, TemplateService,
        ports::{SubstitutionEngine, SubstitutionError, TemplateLoader, TemplateStore},
    };
    pub use crate::domain::{
        PromptTemplate, Record, RenderRecord, SchemaError, TemplateBuilder, ValidationError,
        Value, VariableValidator, Variables,
    };
    pub use crate::error::{PromptError, PromptResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
