// ============================================================================
// domain/error.rs - TEMPLATE SCHEMA AND VARIABLE VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Errors raised while constructing a [`PromptTemplate`](super::PromptTemplate).
///
/// All errors are:
/// - Cloneable (the loader keeps them per file)
/// - Comparable (callers match on exact variants)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    // ========================================================================
    // Field constraint violations
    // ========================================================================
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("field '{field}' is {actual} characters long, maximum is {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// More than one constraint failed; every violation is kept.
    #[error("invalid template: {}", join_violations(.violations))]
    Invalid { violations: Vec<SchemaError> },

    // ========================================================================
    // Structural errors (decoded record has the wrong shape)
    // ========================================================================
    #[error("malformed template record: {0}")]
    MalformedRecord(String),
}

fn join_violations(violations: &[SchemaError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    /// Collapse a list of violations into one error.
    ///
    /// Returns `None` when the list is empty.
    pub(crate) fn from_violations(mut violations: Vec<SchemaError>) -> Option<Self> {
        match violations.len() {
            0 => None,
            1 => violations.pop(),
            _ => Some(Self::Invalid { violations }),
        }
    }

    /// Every individual violation carried by this error.
    pub fn violations(&self) -> Vec<&SchemaError> {
        match self {
            Self::Invalid { violations } => violations.iter().collect(),
            other => vec![other],
        }
    }

    /// Names of the offending fields, in check order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations()
            .into_iter()
            .filter_map(|v| match v {
                Self::EmptyField { field } | Self::FieldTooLong { field, .. } => Some(*field),
                _ => None,
            })
            .collect()
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyField { field } => vec![
                format!("Provide a non-empty value for '{}'", field),
                "Required keys: name, description, template".into(),
            ],
            Self::FieldTooLong { field, max, .. } => {
                vec![format!("Shorten '{}' to at most {} characters", field, max)]
            }
            Self::Invalid { violations } => {
                violations.iter().flat_map(|v| v.suggestions()).collect()
            }
            Self::MalformedRecord(_) => vec![
                "A template record is a mapping with keys: name, description, template".into(),
                "Optional keys: input_variables, examples, metadata".into(),
            ],
        }
    }
}

/// Declared input variables were missing (or null) at render time.
///
/// Every missing name is listed, in the order the template declares them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Missing required variables for template '{template}': {}", .missing.join(", "))]
pub struct ValidationError {
    pub template: String,
    pub missing: Vec<String>,
}

impl ValidationError {
    pub fn suggestions(&self) -> Vec<String> {
        let mut out = vec![format!(
            "Template '{}' requires: {}",
            self.template,
            self.missing.join(", ")
        )];
        out.extend(
            self.missing
                .iter()
                .map(|name| format!("  • pass --var {name}=<value>")),
        );
        out
    }
}
