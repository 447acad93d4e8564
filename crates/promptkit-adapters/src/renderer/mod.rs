//! Substitution engine adapters.

pub mod tera_engine;

pub use tera_engine::TeraRenderer;
