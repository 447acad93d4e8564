//! Filesystem-based template loader.
//!
//! Reads template definitions from YAML or JSON files and converts them into
//! domain [`PromptTemplate`] objects.
//!
//! # File format
//!
//! ```yaml
//! name: zero_shot_qa
//! description: Simple Q&A template
//! template: "Answer the following question: {{ question }}"
//! input_variables: [question]
//! examples:            # optional
//!   - question: What is Rust?
//! metadata:            # optional
//!   pattern: zero-shot
//! ```
//!
//! The format is chosen by extension: `.yaml` / `.yml` are YAML, `.json` is
//! JSON (case-insensitive). Keys not listed above are ignored.
//!
//! # Directory layout
//!
//! ```text
//! prompts/
//! ├── qa.yaml
//! ├── summarize.json
//! └── roles/            ← only scanned when recursive
//!     └── expert.yml
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use promptkit_core::{
    application::{LoaderError, ports::TemplateLoader},
    domain::{PromptTemplate, Value},
};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Supported on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse `raw` into a generic value tree.
    pub fn decode(self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}

/// `true` if `path` has a template file extension.
pub fn is_template_file(path: &Path) -> bool {
    TemplateFormat::from_path(path).is_some()
}

/// Loads templates from YAML and JSON files.
///
/// # Example
///
/// ```no_run
/// use promptkit_adapters::FileTemplateLoader;
/// use promptkit_core::application::ports::TemplateLoader;
///
/// let loader = FileTemplateLoader::new().recursive(true);
/// let templates = loader.load_directory("./prompts".as_ref())?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), promptkit_core::application::LoaderError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTemplateLoader {
    recursive: bool,
}

impl FileTemplateLoader {
    /// Create a loader that only scans the top level of a directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also scan subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Template files under `dir`, in sorted path order.
    ///
    /// Unreadable entries are skipped with a `WARN` log.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
        check_dir(dir)?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            // `path().is_file()` follows symlinked template files.
            if entry.path().is_file() && is_template_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

impl TemplateLoader for FileTemplateLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load_file(&self, path: &Path) -> Result<PromptTemplate, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let format = TemplateFormat::from_path(path).ok_or_else(|| {
            LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            }
        })?;

        let raw = fs::read_to_string(path).map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let value = format.decode(&raw).map_err(|reason| LoaderError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;

        let template = PromptTemplate::from_value(value).map_err(|source| LoaderError::Schema {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(name = template.name(), ?format, "loaded template");
        Ok(template)
    }

    /// Load every `.yaml`, `.yml` and `.json` file under `dir`.
    ///
    /// Files are visited in sorted path order. A file that fails to load is
    /// **skipped with a `WARN` log** rather than failing the whole batch.
    #[instrument(skip(self), fields(dir = %dir.display(), recursive = self.recursive))]
    fn load_directory(&self, dir: &Path) -> Result<Vec<PromptTemplate>, LoaderError> {
        let mut templates = Vec::new();

        for path in self.discover(dir)? {
            match self.load_file(&path) {
                Ok(template) => templates.push(template),
                Err(e) => {
                    warn!(
                        path  = %path.display(),
                        error = %e,
                        "skipping template file due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }
}

fn check_dir(dir: &Path) -> Result<(), LoaderError> {
    if !dir.exists() {
        return Err(LoaderError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(LoaderError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
