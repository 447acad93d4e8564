//! Jinja-style substitution backed by Tera.

use std::error::Error as _;

use promptkit_core::{
    application::ports::{SubstitutionEngine, SubstitutionError, SubstitutionErrorKind},
    domain::Variables,
};
use tera::{Context, Tera};
use tracing::{instrument, trace};

/// Internal name Tera gives to templates rendered with `render_str`.
const ONE_OFF_NAME: &str = "__tera_one_off";

/// Renders template bodies with Tera.
///
/// Each call uses a fresh `Tera` instance, so nothing leaks between renders.
/// Autoescaping is off (prompts are plain text) and referencing a variable
/// that is not in the mapping is an error rather than an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SubstitutionEngine for TeraRenderer {
    #[instrument(skip_all, fields(body_len = body.len()))]
    fn substitute(&self, body: &str, variables: &Variables) -> Result<String, SubstitutionError> {
        let mut context = Context::new();
        for (key, value) in variables.iter() {
            context.insert(key, value);
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.render_str(body, &context).map_err(|e| {
            let messages = error_chain(&e);
            let kind = classify(&messages);
            trace!(?kind, raw = %e, "tera error");
            SubstitutionError::new(kind, clean_messages(&messages))
        })
    }
}

/// Every message in the error's source chain, outermost first.
fn error_chain(error: &tera::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

fn classify(messages: &[String]) -> SubstitutionErrorKind {
    if messages.iter().any(|m| m.contains("Failed to parse")) {
        SubstitutionErrorKind::Syntax
    } else if messages.iter().any(|m| m.contains("not found in context")) {
        SubstitutionErrorKind::UndefinedVariable
    } else {
        SubstitutionErrorKind::Other
    }
}

/// Strip Tera's one-off template name and drop wrapper-only messages.
fn clean_messages(messages: &[String]) -> String {
    let cleaned: Vec<String> = messages
        .iter()
        .map(|msg| {
            msg.replace(&format!("while rendering '{ONE_OFF_NAME}'"), "")
                .replace(
                    &format!("Failed to render '{ONE_OFF_NAME}'"),
                    "Template rendering failed",
                )
                .replace(
                    &format!("Failed to parse '{ONE_OFF_NAME}'"),
                    "Template syntax error",
                )
                .replace(&format!("'{ONE_OFF_NAME}'"), "template")
                .trim()
                .to_string()
        })
        .filter(|msg| {
            !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
        })
        .collect();

    if cleaned.is_empty() {
        "Template syntax error".to_string()
    } else {
        cleaned.join(": ")
    }
}
