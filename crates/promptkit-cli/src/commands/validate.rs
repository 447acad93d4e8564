//! `promptkit validate` — check template files without rendering them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use promptkit_adapters::FileTemplateLoader;
use promptkit_core::application::{LoaderError, ports::TemplateLoader};
use promptkit_core::domain::PromptTemplate;
use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn new(path: PathBuf, result: Result<PromptTemplate, LoaderError>) -> Self {
        match result {
            Ok(template) => Self {
                path,
                name: Some(template.name().to_string()),
                error: None,
            },
            Err(e) => Self {
                path,
                name: None,
                error: Some(e.to_string()),
            },
        }
    }

    fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(
    args: ValidateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let recursive = global.template_source(config).recursive;
    let loader = FileTemplateLoader::new().recursive(recursive);
    let reports = check(&loader, &args.path)?;

    let total = reports.len();
    let failed = reports.iter().filter(|r| !r.is_valid()).count();

    if output.is_json() {
        output.json(&reports)?;
    } else {
        for report in &reports {
            match (&report.name, &report.error) {
                (Some(name), None) => {
                    output.success(&format!("{} ({name})", report.path.display()))?
                }
                (_, Some(error)) => output.error(error)?,
                (None, None) => {}
            }
        }
        for (name, paths) in duplicate_names(&reports) {
            output.warning(&format!(
                "'{name}' is defined by {} files; the last one loaded wins: {}",
                paths.len(),
                paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ))?;
        }
    }

    if failed > 0 {
        return Err(CliError::InvalidTemplates { failed, total });
    }

    if !output.is_json() {
        output.info(&format!("{total} template file(s) valid"))?;
    }
    Ok(())
}

/// Load `path` (a file) or every template file under it (a directory).
fn check(loader: &FileTemplateLoader, path: &Path) -> CliResult<Vec<FileReport>> {
    if path.is_dir() {
        let files = loader.discover(path)?;
        if files.is_empty() {
            return Err(CliError::invalid_input(format!(
                "no .yaml, .yml or .json files found in {}",
                path.display()
            )));
        }
        Ok(files
            .into_iter()
            .map(|file| {
                let result = loader.load_file(&file);
                FileReport::new(file, result)
            })
            .collect())
    } else {
        let result = loader.load_file(path);
        // A missing path is a lookup failure, not an invalid template.
        if let Err(e @ LoaderError::NotFound { .. }) = result {
            return Err(e.into());
        }
        Ok(vec![FileReport::new(path.to_path_buf(), result)])
    }
}

/// Template names claimed by more than one valid file, sorted by name.
fn duplicate_names(reports: &[FileReport]) -> Vec<(&str, Vec<&Path>)> {
    let mut by_name: HashMap<&str, Vec<&Path>> = HashMap::new();
    for report in reports {
        if let Some(name) = &report.name {
            by_name.entry(name).or_default().push(&report.path);
        }
    }

    let mut dups: Vec<_> = by_name.into_iter().filter(|(_, p)| p.len() > 1).collect();
    dups.sort_by(|a, b| a.0.cmp(b.0));
    dups
}
