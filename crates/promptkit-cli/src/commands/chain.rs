//! `promptkit chain` — render templates in sequence, each output feeding the
//! next step.

use promptkit_adapters::TeraRenderer;
use promptkit_core::{application::PromptEngine, domain::PromptTemplate};
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    cli::{ChainArgs, GlobalArgs},
    commands::{collect_variables, fill_examples, resolve_template, template_service},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Run the chain and print the final output, optionally with every step.
#[instrument(skip_all, fields(steps = args.templates.len()))]
pub fn execute(
    args: ChainArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let output_key = args
        .output_key
        .clone()
        .unwrap_or_else(|| config.chain.output_key.clone());
    if output_key.trim().is_empty() {
        return Err(CliError::invalid_input("--output-key must not be empty"));
    }

    let service = template_service(&global.template_source(&config), &output)?;
    let steps = args
        .templates
        .iter()
        .map(|reference| resolve_template(&service, reference))
        .collect::<CliResult<Vec<PromptTemplate>>>()?;
    let mut variables = collect_variables(&args.vars)?;
    // The first few-shot step supplies `examples_str` for the whole chain.
    for step in &steps {
        fill_examples(step, &mut variables);
    }

    let engine = PromptEngine::new(Box::new(TeraRenderer::new()));
    let text = engine.chain_with_key(&steps, &variables, &output_key)?;
    let history = engine.history()?;

    info!(steps = steps.len(), output_key = %output_key, "chain finished");

    if output.is_json() {
        let mut doc = json!({
            "templates": steps.iter().map(PromptTemplate::name).collect::<Vec<_>>(),
            "output_key": output_key,
            "output": text,
        });
        if args.history {
            doc["history"] = serde_json::to_value(&history)
                .map_err(|e| CliError::internal("Render history is not serialisable", e))?;
        }
        output.json(&doc)?;
        return Ok(());
    }

    if args.history {
        for (step, record) in history.iter().enumerate() {
            output.header(&format!(
                "Step {} · {} · {}",
                step + 1,
                record.template_name,
                record.rendered_at.format("%H:%M:%S%.3f"),
            ))?;
            output.print(&record.rendered_text)?;
            output.print("")?;
        }
        output.header("Final output:")?;
    }
    output.result(&text)?;

    Ok(())
}
