//! Built-in prompt-pattern templates.
//!
//! Two templates for each of the five common prompting patterns:
//!
//! | Pattern            | Templates                                      |
//! |--------------------|------------------------------------------------|
//! | zero-shot          | `zero_shot_qa`, `zero_shot_summarize`          |
//! | few-shot           | `few_shot_sentiment`, `few_shot_translation`   |
//! | chain-of-thought   | `cot_math`, `cot_logic`                        |
//! | role-based         | `role_expert`, `role_student`                  |
//! | structured output  | `structured_json`, `structured_list`           |
//!
//! Every template carries a `pattern` metadata entry. Few-shot templates
//! keep their examples in `examples` and list the `[field, label]` pairs to
//! show in `example_fields`; the body expects the formatted block in the
//! `examples_str` variable (see [`examples_variable`]).

use promptkit_core::domain::{PromptTemplate, Record, SchemaError, Value};
use serde_json::json;
use tracing::{debug, instrument};

/// Metadata key naming the prompting pattern.
pub const PATTERN_KEY: &str = "pattern";

/// Variable few-shot bodies read their formatted examples from.
pub const EXAMPLES_VAR: &str = "examples_str";

/// Metadata key holding `[field, label]` pairs for [`examples_variable`].
pub const EXAMPLE_FIELDS_KEY: &str = "example_fields";

/// Every built-in template, in pattern order.
///
/// # Errors
///
/// Only fails if a built-in definition is invalid, which the tests below
/// rule out.
#[instrument]
pub fn all_templates() -> Result<Vec<PromptTemplate>, SchemaError> {
    let templates = vec![
        zero_shot_qa()?,
        zero_shot_summarize()?,
        few_shot_sentiment()?,
        few_shot_translation()?,
        cot_math()?,
        cot_logic()?,
        role_expert()?,
        role_student()?,
        structured_json()?,
        structured_list()?,
    ];
    debug!(count = templates.len(), "built-in templates ready");
    Ok(templates)
}

/// Join few-shot examples into `Key: value` blocks, one line per field in
/// `fields` order, examples separated by a newline.
///
/// Examples missing a field render that line with an empty value.
pub fn format_examples(examples: &[Record], fields: &[(&str, &str)]) -> String {
    examples
        .iter()
        .map(|example| {
            fields
                .iter()
                .map(|(key, label)| {
                    let value = match example.get(*key) {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Null) | None => String::new(),
                        Some(other) => other.to_string(),
                    };
                    format!("{label}: {value}")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The `examples_str` value for `template`, built from its own examples.
///
/// `None` unless the template requires `examples_str` and has examples.
/// Labels come from the `example_fields` metadata; without it every field of
/// the first example is shown, labelled with its capitalised key.
pub fn examples_variable(template: &PromptTemplate) -> Option<String> {
    if !template.requires(EXAMPLES_VAR) {
        return None;
    }
    let examples = template.examples().filter(|e| !e.is_empty())?;

    let fields = example_fields(template).unwrap_or_else(|| {
        examples[0]
            .keys()
            .map(|key| (key.clone(), capitalise(key)))
            .collect()
    });
    let pairs: Vec<(&str, &str)> = fields
        .iter()
        .map(|(key, label)| (key.as_str(), label.as_str()))
        .collect();

    Some(format_examples(examples, &pairs))
}

fn example_fields(template: &PromptTemplate) -> Option<Vec<(String, String)>> {
    let entries = template.metadata()?.get(EXAMPLE_FIELDS_KEY)?.as_array()?;
    let fields = entries
        .iter()
        .map(|entry| match entry.as_array()?.as_slice() {
            [Value::String(key), Value::String(label)] => Some((key.clone(), label.clone())),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    (!fields.is_empty()).then_some(fields)
}

fn capitalise(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Zero-shot ────────────────────────────────────────────────────────────────

fn zero_shot_qa() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("zero_shot_qa")
        .description("Simple Q&A template for answering questions directly")
        .body("Answer the following question: {{ question }}")
        .input_variable("question")
        .meta(PATTERN_KEY, "zero-shot")
        .build()
}

fn zero_shot_summarize() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("zero_shot_summarize")
        .description("Template for summarizing text directly")
        .body("Summarize the following text in 2-3 sentences:\n{{ text }}")
        .input_variable("text")
        .meta(PATTERN_KEY, "zero-shot")
        .build()
}

// ── Few-shot ─────────────────────────────────────────────────────────────────

fn few_shot_sentiment() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("few_shot_sentiment")
        .description("Few-shot sentiment analysis with examples")
        .body(
            "Classify the sentiment of the following text:\n\n\
             {{ examples_str }}\n\n\
             Text: {{ text }}\n\
             Sentiment:",
        )
        .input_variables(["text", "examples_str"])
        .examples(records(json!([
            {"text": "I loved this movie!", "sentiment": "positive"},
            {"text": "This was terrible.", "sentiment": "negative"},
            {"text": "It was okay.", "sentiment": "neutral"}
        ])))
        .meta(PATTERN_KEY, "few-shot")
        .meta(
            EXAMPLE_FIELDS_KEY,
            json!([["text", "Text"], ["sentiment", "Sentiment"]]),
        )
        .build()
}

fn few_shot_translation() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("few_shot_translation")
        .description("Few-shot English to Spanish translation")
        .body(
            "Translate the following English text to Spanish:\n\n\
             {{ examples_str }}\n\n\
             English: {{ english_text }}\n\
             Spanish:",
        )
        .input_variables(["english_text", "examples_str"])
        .examples(records(json!([
            {"english": "Hello", "spanish": "Hola"},
            {"english": "Thank you", "spanish": "Gracias"},
            {"english": "Good morning", "spanish": "Buenos días"}
        ])))
        .meta(PATTERN_KEY, "few-shot")
        .meta(
            EXAMPLE_FIELDS_KEY,
            json!([["english", "English"], ["spanish", "Spanish"]]),
        )
        .build()
}

// ── Chain-of-thought ─────────────────────────────────────────────────────────

fn cot_math() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("cot_math")
        .description("Step-by-step math problem solving")
        .body(
            "Solve this math problem step by step:\n\n\
             Problem: {{ problem }}\n\n\
             Step 1: Understand the problem\n\
             Step 2: Identify the approach\n\
             Step 3: Calculate\n\
             Step 4: Verify the answer\n\n\
             Answer:",
        )
        .input_variable("problem")
        .meta(PATTERN_KEY, "chain-of-thought")
        .build()
}

fn cot_logic() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("cot_logic")
        .description("Step-by-step logical reasoning")
        .body(
            "Solve this logic puzzle step by step:\n\n\
             Puzzle: {{ puzzle }}\n\n\
             Let's think through this:\n\
             1. What do we know?\n\
             2. What can we deduce?\n\
             3. What's the conclusion?\n\n\
             Answer:",
        )
        .input_variable("puzzle")
        .meta(PATTERN_KEY, "chain-of-thought")
        .build()
}

// ── Role-based ───────────────────────────────────────────────────────────────

fn role_expert() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("role_expert")
        .description("Prompt that assigns an expert role")
        .body(
            "You are an expert {{ expertise }} with {{ years }} years of experience.\n\n\
             Question: {{ question }}\n\n\
             Provide a detailed answer based on your expertise:",
        )
        .input_variables(["expertise", "years", "question"])
        .meta(PATTERN_KEY, "role-based")
        .build()
}

fn role_student() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("role_student")
        .description("Prompt that uses student perspective")
        .body(
            "Imagine you are a {{ level }} student learning {{ subject }}.\n\n\
             Explain in simple terms: {{ topic }}",
        )
        .input_variables(["level", "subject", "topic"])
        .meta(PATTERN_KEY, "role-based")
        .build()
}

// ── Structured output ────────────────────────────────────────────────────────

fn structured_json() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("structured_json")
        .description("Template for structured JSON output")
        .body(
            "Extract information from the text and return as JSON:\n\n\
             Text: {{ text }}\n\n\
             Return the response in this JSON format:\n\
             {\"entities\": [], \"sentiment\": \"\", \"summary\": \"\"}\n\n\
             JSON Response:",
        )
        .input_variable("text")
        .meta(PATTERN_KEY, "structured-output")
        .build()
}

fn structured_list() -> Result<PromptTemplate, SchemaError> {
    PromptTemplate::builder()
        .name("structured_list")
        .description("Template for structured list output")
        .body(
            "Generate a list of {{ count }} {{ item_type }} related to {{ topic }}.\n\n\
             Format each item as: - Item_Name: Description\n\n\
             Output:",
        )
        .input_variables(["count", "item_type", "topic"])
        .meta(PATTERN_KEY, "structured-output")
        .build()
}

fn records(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_builtins_are_valid_and_unique() {
        let templates = all_templates().unwrap();
        assert_eq!(templates.len(), 10);

        let names: HashSet<_> = templates.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn every_builtin_has_a_pattern() {
        let expected: HashSet<_> = [
            "zero-shot",
            "few-shot",
            "chain-of-thought",
            "role-based",
            "structured-output",
        ]
        .into_iter()
        .collect();

        let found: HashSet<String> = all_templates()
            .unwrap()
            .iter()
            .map(|t| {
                t.metadata()
                    .and_then(|m| m.get(PATTERN_KEY))
                    .and_then(Value::as_str)
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(
            found,
            expected
                .into_iter()
                .map(String::from)
                .collect::<HashSet<String>>()
        );
    }

    #[test]
    fn few_shot_templates_carry_examples() {
        let sentiment = few_shot_sentiment().unwrap();
        let examples = sentiment.examples().unwrap();
        assert_eq!(examples.len(), 3);
        assert!(sentiment.requires("examples_str"));
    }

    #[test]
    fn declared_inputs_appear_in_body() {
        for template in all_templates().unwrap() {
            for var in template.input_variables() {
                assert!(
                    template.body().contains(&format!("{{{{ {var} }}}}")),
                    "{} does not use {var}",
                    template.name()
                );
            }
        }
    }

    #[test]
    fn examples_variable_uses_metadata_labels() {
        let translation = few_shot_translation().unwrap();

        assert_eq!(
            examples_variable(&translation).unwrap(),
            "English: Hello\nSpanish: Hola\n\
             English: Thank you\nSpanish: Gracias\n\
             English: Good morning\nSpanish: Buenos días"
        );
    }

    #[test]
    fn examples_variable_falls_back_to_example_keys() {
        let template = PromptTemplate::builder()
            .name("fs")
            .description("d")
            .body("{{ examples_str }}\nQ: {{ q }}")
            .input_variables(["q", EXAMPLES_VAR])
            .examples(records(json!([{"question": "2+2", "answer": "4"}])))
            .build()
            .unwrap();

        assert_eq!(
            examples_variable(&template).unwrap(),
            "Question: 2+2\nAnswer: 4"
        );
    }

    #[test]
    fn examples_variable_none_without_examples() {
        assert!(examples_variable(&zero_shot_qa().unwrap()).is_none());

        let bare = PromptTemplate::new("fs", "d", "{{ examples_str }}", [EXAMPLES_VAR]).unwrap();
        assert!(examples_variable(&bare).is_none());
    }

    #[test]
    fn format_examples_builds_labelled_blocks() {
        let sentiment = few_shot_sentiment().unwrap();
        let text = format_examples(sentiment.examples().unwrap(), &[
            ("text", "Text"),
            ("sentiment", "Sentiment"),
        ]);

        assert_eq!(
            text,
            "Text: I loved this movie!\nSentiment: positive\n\
             Text: This was terrible.\nSentiment: negative\n\
             Text: It was okay.\nSentiment: neutral"
        );
    }
}
