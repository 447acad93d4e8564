//! Integration tests for promptkit-core's public API.

use promptkit_core::prelude::*;
use serde_json::json;

/// Substitutes `{{ name }}` with string values only.
struct Plain;

impl SubstitutionEngine for Plain {
    fn substitute(&self, body: &str, variables: &Variables) -> Result<String, SubstitutionError> {
        let mut out = body.to_string();
        for (key, value) in variables.iter() {
            if let Some(s) = value.as_str() {
                out = out.replace(&format!("{{{{ {key} }}}}"), s);
            }
        }
        Ok(out)
    }
}

#[test]
fn template_survives_json_round_trip() {
    let original = PromptTemplate::builder()
        .name("few_shot_sentiment")
        .description("Few-shot sentiment analysis")
        .body("Classify: {{ text }}")
        .input_variable("text")
        .example(
            json!({"text": "I love this!", "sentiment": "positive"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .meta("pattern", "few-shot")
        .build()
        .unwrap();

    let encoded = serde_json::to_string(&original).unwrap();
    let decoded: PromptTemplate = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn deserializing_runs_validation() {
    let result: Result<PromptTemplate, _> = serde_json::from_value(json!({
        "name": "x",
        "description": "",
        "template": "body"
    }));

    assert!(result.is_err());
}

#[test]
fn name_length_boundary() {
    let ok = PromptTemplate::new("a".repeat(255), "d", "b", Vec::<String>::new());
    let too_long = PromptTemplate::new("a".repeat(256), "d", "b", Vec::<String>::new());

    assert!(ok.is_ok());
    assert!(matches!(
        too_long,
        Err(SchemaError::FieldTooLong {
            field: "name",
            max: 255,
            actual: 256
        })
    ));
}

#[test]
fn from_value_then_render_then_chain() {
    let extract = PromptTemplate::from_value(json!({
        "name": "extract",
        "description": "Extract key points",
        "template": "Extract: {{ text }}",
        "input_variables": ["text"]
    }))
    .unwrap();
    let summarize = PromptTemplate::from_value(json!({
        "name": "summarize",
        "description": "Summarize",
        "template": "Summarize: {{ output }}",
        "input_variables": ["output"]
    }))
    .unwrap();

    let engine = PromptEngine::new(Box::new(Plain));
    let vars = Variables::new().with("text", "abc");

    assert_eq!(engine.render(&extract, &vars).unwrap(), "Extract: abc");

    let out = engine.chain(&[extract, summarize], &vars).unwrap();
    assert_eq!(out, "Summarize: Extract: abc");
    assert_eq!(engine.history_len().unwrap(), 3);
}

#[test]
fn engine_errors_convert_to_prompt_error() {
    let t = PromptTemplate::new("needs_x", "d", "{{ x }}", ["x"]).unwrap();
    let engine = PromptEngine::new(Box::new(Plain));

    let err: PromptError = engine.render(&t, &Variables::new()).unwrap_err().into();

    assert_eq!(
        err.to_string(),
        "Missing required variables for template 'needs_x': x"
    );
    assert!(!err.suggestions().is_empty());
}
