//! Implementation of the `promptkit list` command.

use promptkit_adapters::builtin_templates::PATTERN_KEY;
use promptkit_core::domain::PromptTemplate;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    commands::template_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = template_service(&global.template_source(&config), &output)?;
    let templates = service.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            let width = templates
                .iter()
                .map(|t| t.name().chars().count())
                .max()
                .unwrap_or(0);
            for template in &templates {
                output.result(&format!(
                    "  {:<width$}  {}  [{}]",
                    template.name(),
                    template.description(),
                    template.input_variables().join(", "),
                ))?;
            }
        }

        // JSON must stay parseable in pipes, so it ignores --quiet.
        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for t in &templates {
                output.result(t.name())?;
            }
        }

        ListFormat::Csv => {
            output.result("name,description,input_variables,pattern")?;
            for t in &templates {
                output.result(&csv_row(t))?;
            }
        }
    }

    Ok(())
}

fn csv_row(template: &PromptTemplate) -> String {
    let pattern = template
        .metadata()
        .and_then(|m| m.get(PATTERN_KEY))
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    [
        template.name(),
        template.description(),
        template.input_variables().join(" ").as_str(),
        pattern,
    ]
    .iter()
    .map(|field| csv_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a field when it contains a separator, quote or newline.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field_unquoted() {
        assert_eq!(csv_field("zero_shot_qa"), "zero_shot_qa");
    }

    #[test]
    fn field_with_comma_quoted() {
        assert_eq!(csv_field("a, b"), "\"a, b\"");
    }

    #[test]
    fn embedded_quotes_doubled() {
        assert_eq!(csv_field(r#"say "hi""#), r#""say ""hi""""#);
    }

    #[test]
    fn row_includes_pattern_metadata() {
        let template = PromptTemplate::builder()
            .name("qa")
            .description("Simple Q&A template")
            .body("Q: {{ question }}")
            .input_variables(["question"])
            .meta("pattern", "zero-shot")
            .build()
            .unwrap();

        assert_eq!(csv_row(&template), "qa,Simple Q&A template,question,zero-shot");
    }

    #[test]
    fn row_without_metadata_has_empty_pattern() {
        let template = PromptTemplate::new("t", "d", "x", Vec::<String>::new()).unwrap();
        assert_eq!(csv_row(&template), "t,d,,");
    }
}
