use crate::domain::{
    entities::PromptTemplate, error::ValidationError, value_objects::Variables,
};

/// Checks a variable mapping against a template's declared inputs.
///
/// A declared variable is satisfied when the mapping has the key and its
/// value is not `Null`. Undeclared keys in the mapping are allowed.
pub struct VariableValidator;

impl VariableValidator {
    /// Declared variables that are absent or `Null`, in declaration order.
    pub fn missing(template: &PromptTemplate, variables: &Variables) -> Vec<String> {
        template
            .input_variables()
            .iter()
            .filter(|name| !variables.is_present(name))
            .cloned()
            .collect()
    }

    /// Fail with every missing variable, not just the first.
    pub fn validate(
        template: &PromptTemplate,
        variables: &Variables,
    ) -> Result<(), ValidationError> {
        let missing = Self::missing(template, variables);
        if missing.is_empty() {
            return Ok(());
        }

        Err(ValidationError {
            template: template.name().to_string(),
            missing,
        })
    }
}
