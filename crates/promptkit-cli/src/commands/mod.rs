//! Command handlers, one module per subcommand, plus the helpers they share:
//! building the template service, resolving `TEMPLATE` arguments and
//! collecting variables.

pub mod chain;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod render;
pub mod validate;

use std::fs;
use std::path::Path;

use promptkit_adapters::{
    FileTemplateLoader, InMemoryStore,
    builtin_templates::{EXAMPLES_VAR, examples_variable},
    template_loader::TemplateFormat,
};
use promptkit_core::prelude::*;
use tracing::{debug, instrument};

use crate::{
    cli::{TemplateSource, VarArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Service holding the built-in templates plus the configured directory.
///
/// A `--dir` that does not exist is an error; a `templates.dir` from config
/// that is missing only produces a warning.
#[instrument(skip_all, fields(dir = ?source.dir))]
pub fn template_service(
    source: &TemplateSource<'_>,
    output: &OutputManager,
) -> CliResult<TemplateService> {
    let service = TemplateService::new(
        Box::new(InMemoryStore::with_builtin()?),
        Box::new(FileTemplateLoader::new().recursive(source.recursive)),
    );

    match source.dir {
        Some(dir) if source.explicit || dir.is_dir() => {
            service.load_directory(dir)?;
        }
        Some(dir) => {
            output.warning(&format!(
                "Configured template directory {} does not exist",
                dir.display()
            ))?;
        }
        None => {}
    }

    Ok(service)
}

/// Fill `examples_str` from the template's stored examples unless the
/// caller already supplied it.
pub fn fill_examples(template: &PromptTemplate, vars: &mut Variables) {
    if vars.is_present(EXAMPLES_VAR) {
        return;
    }
    if let Some(formatted) = examples_variable(template) {
        debug!(template = template.name(), "examples_str built from examples");
        vars.insert(EXAMPLES_VAR, formatted);
    }
}

/// Resolve a `TEMPLATE` argument: an existing file is loaded, anything else
/// is looked up by name.
pub fn resolve_template(service: &TemplateService, reference: &str) -> CliResult<PromptTemplate> {
    let path = Path::new(reference);
    if path.is_file() {
        debug!(path = reference, "resolving template from file");
        return Ok(service.load_file(path)?);
    }

    service
        .find(reference)?
        .ok_or_else(|| CliError::TemplateNotFound {
            name: reference.to_string(),
        })
}

/// Merge `--vars-file` and `--var` pairs; `--var` wins on conflicts.
pub fn collect_variables(args: &VarArgs) -> CliResult<Variables> {
    let mut vars = match &args.vars_file {
        Some(path) => read_vars_file(path)?,
        None => Variables::new(),
    };

    for pair in &args.vars {
        let (key, value) = parse_var(pair)?;
        vars.insert(key, value);
    }

    Ok(vars)
}

/// `KEY=VALUE` → `(KEY, VALUE)`. The value is JSON when it parses as JSON and
/// a plain string otherwise.
pub fn parse_var(pair: &str) -> CliResult<(String, Value)> {
    let (key, raw) = pair.split_once('=').ok_or_else(|| {
        CliError::invalid_input(format!("'{pair}' is not in KEY=VALUE form"))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::invalid_input(format!(
            "'{pair}' has an empty variable name"
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn read_vars_file(path: &Path) -> CliResult<Variables> {
    let format = TemplateFormat::from_path(path).ok_or_else(|| {
        CliError::invalid_input(format!(
            "{} must be a .yaml, .yml or .json file",
            path.display()
        ))
    })?;

    let raw = fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read variables from {}", path.display()))?;

    match format.decode(&raw) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(_) => Err(CliError::invalid_input(format!(
            "{} must contain a mapping of variable names to values",
            path.display()
        ))),
        Err(reason) => Err(CliError::invalid_input(format!(
            "{} could not be parsed: {reason}",
            path.display()
        ))),
    }
}
