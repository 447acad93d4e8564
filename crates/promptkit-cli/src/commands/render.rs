//! `promptkit render` — render one template.

use promptkit_adapters::TeraRenderer;
use promptkit_core::application::PromptEngine;
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, RenderArgs},
    commands::{collect_variables, fill_examples, resolve_template, template_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Render `args.template` with the collected variables and print the text.
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(
    args: RenderArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = template_service(&global.template_source(&config), &output)?;
    let template = resolve_template(&service, &args.template)?;
    let mut variables = collect_variables(&args.vars)?;
    fill_examples(&template, &mut variables);

    let engine = PromptEngine::new(Box::new(TeraRenderer::new()));
    let text = engine.render(&template, &variables)?;

    info!(template = template.name(), "template rendered");

    if output.is_json() {
        output.json(&json!({
            "template": template.name(),
            "output": text,
        }))?;
    } else {
        output.result(&text)?;
    }

    Ok(())
}
