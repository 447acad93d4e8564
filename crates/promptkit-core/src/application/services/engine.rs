//! Prompt Engine - render and chain templates.
//!
//! The engine owns its render history. Substitution is delegated to the
//! injected [`SubstitutionEngine`]; the engine only validates, maps errors
//! and records.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{EngineError, ports::SubstitutionEngine, services::RenderHistory},
    domain::{PromptTemplate, RenderRecord, VariableValidator, Variables},
};

/// Key a chain writes each step's output under unless told otherwise.
pub const DEFAULT_OUTPUT_KEY: &str = "output";

/// Renders templates and runs chains, keeping a history of every success.
pub struct PromptEngine {
    substituter: Box<dyn SubstitutionEngine>,
    history: RenderHistory,
}

impl PromptEngine {
    /// Create an engine with an empty history.
    pub fn new(substituter: Box<dyn SubstitutionEngine>) -> Self {
        Self {
            substituter,
            history: RenderHistory::new(),
        }
    }

    /// Render one template.
    ///
    /// Declared inputs are checked first; a missing or `Null` input fails
    /// before the substitution engine is called. The full mapping is then
    /// offered to the body, so undeclared extras can still be referenced.
    /// Only successful renders are recorded.
    #[instrument(skip_all, fields(template = %template.name()))]
    pub fn render(
        &self,
        template: &PromptTemplate,
        variables: &Variables,
    ) -> Result<String, EngineError> {
        VariableValidator::validate(template, variables)?;

        let text = self
            .substituter
            .substitute(template.body(), variables)
            .map_err(|e| {
                warn!(kind = ?e.kind, error = %e, "substitution failed");
                EngineError::Render {
                    template: template.name().to_string(),
                    reason: e.message,
                }
            })?;

        self.history.record(RenderRecord::new(
            template.name(),
            text.clone(),
            variables.clone(),
        ))?;

        debug!(chars = text.chars().count(), "rendered");
        Ok(text)
    }

    /// Run a chain writing each output under [`DEFAULT_OUTPUT_KEY`].
    pub fn chain(
        &self,
        templates: &[PromptTemplate],
        initial: &Variables,
    ) -> Result<String, EngineError> {
        self.chain_with_key(templates, initial, DEFAULT_OUTPUT_KEY)
    }

    /// Run `templates` in order, feeding each output to the next step.
    ///
    /// The caller's `initial` mapping is never modified. After each step the
    /// rendered text is stored under `output_key` before the next step is
    /// validated. The first failure aborts the chain with
    /// [`EngineError::Chain`]; steps after it do not run, although renders
    /// that already succeeded stay in the history.
    #[instrument(skip(self, templates, initial), fields(steps = templates.len()))]
    pub fn chain_with_key(
        &self,
        templates: &[PromptTemplate],
        initial: &Variables,
        output_key: &str,
    ) -> Result<String, EngineError> {
        if templates.is_empty() {
            debug!("empty chain");
            return Ok(String::new());
        }

        let mut working = initial.clone();
        let mut output = String::new();

        for (step, template) in templates.iter().enumerate() {
            output = self.render(template, &working).map_err(|source| {
                warn!(step, template = template.name(), "chain aborted");
                EngineError::Chain {
                    template: template.name().to_string(),
                    step,
                    source: Box::new(source),
                }
            })?;
            working.insert(output_key, output.clone());
        }

        info!(steps = templates.len(), "chain completed");
        Ok(output)
    }

    /// Copy of every render record, oldest first.
    pub fn history(&self) -> Result<Vec<RenderRecord>, EngineError> {
        self.history.snapshot()
    }

    /// Most recent render record.
    pub fn last_render(&self) -> Result<Option<RenderRecord>, EngineError> {
        self.history.last()
    }

    pub fn clear_history(&self) -> Result<(), EngineError> {
        self.history.clear()
    }

    pub fn history_len(&self) -> Result<usize, EngineError> {
        self.history.len()
    }
}

impl std::fmt::Debug for PromptEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptEngine")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
