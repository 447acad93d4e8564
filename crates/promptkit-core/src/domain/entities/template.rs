//! Prompt template aggregate.
//!
//! A [`PromptTemplate`] is the unit everything else works on: the engine
//! renders it, the chain executor sequences it, loaders produce it from files.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Template Domain                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PromptTemplate (Aggregate Root, immutable)                 │
//! │  ├── name              1..=255 chars                        │
//! │  ├── description       1..=1000 chars                       │
//! │  ├── body              non-empty, `{{ var }}` placeholders  │
//! │  ├── input_variables   ordered, required at render time     │
//! │  ├── examples          optional free-form records           │
//! │  └── metadata          optional free-form record            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TemplateBuilder  ──build()──▶  Result<PromptTemplate, _>   │
//! │  TemplateRecord   ◀──serde──▶  YAML / JSON file shape       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every way of obtaining a `PromptTemplate` (builder, record, decoded value,
//! serde) goes through the same validation in [`TemplateBuilder::build`].

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::SchemaError,
    value_objects::{Record, Value},
};

/// Maximum length of a template name, in characters.
pub const NAME_MAX_LEN: usize = 255;

/// Maximum length of a template description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A validated prompt template.
///
/// Fields are private: once built, nothing can change them. Clone to derive
/// a variant through [`PromptTemplate::to_builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateRecord", into = "TemplateRecord")]
pub struct PromptTemplate {
    name: String,
    description: String,
    body: String,
    input_variables: Vec<String>,
    examples: Option<Vec<Record>>,
    metadata: Option<Record>,
}

impl PromptTemplate {
    /// Create a builder.
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Shortcut for the common case without examples or metadata.
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        input_variables: I,
    ) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder()
            .name(name)
            .description(description)
            .body(body)
            .input_variables(input_variables)
            .build()
    }

    /// Build from the file-format record.
    pub fn from_record(record: TemplateRecord) -> Result<Self, SchemaError> {
        Self::builder()
            .name(record.name)
            .description(record.description)
            .body(record.template)
            .input_variables(record.input_variables)
            .maybe_examples(record.examples)
            .maybe_metadata(record.metadata)
            .build()
    }

    /// Build from an already-decoded mapping (e.g. parsed YAML or JSON).
    ///
    /// # Errors
    /// - [`SchemaError::MalformedRecord`] if `value` is not a mapping, a
    ///   required key is missing or a key has the wrong type. Unknown keys
    ///   are ignored.
    /// - Any field-constraint violation from [`TemplateBuilder::build`].
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::MalformedRecord(format!(
                "expected a mapping, got {}",
                value_kind(&value)
            )));
        }

        let record: TemplateRecord = serde_json::from_value(value)
            .map_err(|e| SchemaError::MalformedRecord(e.to_string()))?;

        Self::from_record(record)
    }

    /// Convert back into the file-format record.
    pub fn to_record(&self) -> TemplateRecord {
        self.clone().into()
    }

    /// Start a builder pre-filled with this template's fields.
    pub fn to_builder(&self) -> TemplateBuilder {
        TemplateBuilder {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            body: Some(self.body.clone()),
            input_variables: self.input_variables.clone(),
            examples: self.examples.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Raw template text with placeholders.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Required variables, in declaration order.
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn examples(&self) -> Option<&[Record]> {
        self.examples.as_deref()
    }

    pub fn metadata(&self) -> Option<&Record> {
        self.metadata.as_ref()
    }

    /// `true` if `variable` is declared as required.
    pub fn requires(&self, variable: &str) -> bool {
        self.input_variables.iter().any(|v| v == variable)
    }

    /// Quick heuristic: does the body contain placeholder syntax at all?
    pub fn has_placeholders(&self) -> bool {
        self.body.contains("{{") && self.body.contains("}}")
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`PromptTemplate`].
///
/// `build()` checks every field constraint and reports all violations at
/// once rather than stopping at the first.
#[derive(Debug, Default, Clone)]
pub struct TemplateBuilder {
    name: Option<String>,
    description: Option<String>,
    body: Option<String>,
    input_variables: Vec<String>,
    examples: Option<Vec<Record>>,
    metadata: Option<Record>,
}

impl TemplateBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append one required variable.
    pub fn input_variable(mut self, name: impl Into<String>) -> Self {
        self.input_variables.push(name.into());
        self
    }

    /// Replace the required variables.
    pub fn input_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_variables = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn examples(mut self, examples: Vec<Record>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Append one example record.
    pub fn example(mut self, example: Record) -> Self {
        self.examples.get_or_insert_with(Vec::new).push(example);
        self
    }

    pub fn metadata(mut self, metadata: Record) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set a single metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Record::new)
            .insert(key.into(), value.into());
        self
    }

    fn maybe_examples(mut self, examples: Option<Vec<Record>>) -> Self {
        self.examples = examples;
        self
    }

    fn maybe_metadata(mut self, metadata: Option<Record>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Validate and build the template.
    ///
    /// # Errors
    /// - [`SchemaError::EmptyField`] for an empty (or unset) `name`,
    ///   `description` or `body`.
    /// - [`SchemaError::FieldTooLong`] when `name` exceeds
    ///   [`NAME_MAX_LEN`] or `description` exceeds [`DESCRIPTION_MAX_LEN`].
    /// - [`SchemaError::Invalid`] when more than one of the above applies.
    pub fn build(self) -> Result<PromptTemplate, SchemaError> {
        let name = self.name.unwrap_or_default();
        let description = self.description.unwrap_or_default();
        let body = self.body.unwrap_or_default();

        let mut violations = Vec::new();
        check_length("name", &name, Some(NAME_MAX_LEN), &mut violations);
        check_length(
            "description",
            &description,
            Some(DESCRIPTION_MAX_LEN),
            &mut violations,
        );
        check_length("template", &body, None, &mut violations);

        if let Some(err) = SchemaError::from_violations(violations) {
            return Err(err);
        }

        Ok(PromptTemplate {
            name,
            description,
            body,
            input_variables: self.input_variables,
            examples: self.examples,
            metadata: self.metadata,
        })
    }
}

/// Lengths are counted in characters, not bytes.
fn check_length(
    field: &'static str,
    value: &str,
    max: Option<usize>,
    violations: &mut Vec<SchemaError>,
) {
    if value.is_empty() {
        violations.push(SchemaError::EmptyField { field });
        return;
    }

    if let Some(max) = max {
        let actual = value.chars().count();
        if actual > max {
            violations.push(SchemaError::FieldTooLong { field, max, actual });
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

// ============================================================================
// Record (file format)
// ============================================================================

/// On-disk / interchange shape of a template.
///
/// Field names follow the file format; note that the body is stored under
/// `template`. A record is unvalidated until passed to
/// [`PromptTemplate::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub description: String,
    pub template: String,
    #[serde(default)]
    pub input_variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Record>,
}

impl From<PromptTemplate> for TemplateRecord {
    fn from(t: PromptTemplate) -> Self {
        Self {
            name: t.name,
            description: t.description,
            template: t.body,
            input_variables: t.input_variables,
            examples: t.examples,
            metadata: t.metadata,
        }
    }
}

impl TryFrom<TemplateRecord> for PromptTemplate {
    type Error = SchemaError;

    fn try_from(record: TemplateRecord) -> Result<Self, Self::Error> {
        PromptTemplate::from_record(record)
    }
}
