//! Flags accepted by every promptkit subcommand.
//!
//! Besides verbosity and colour these carry the template source (`--dir`,
//! `--recursive`) and the result format, both of which fall back to the
//! loaded [`AppConfig`] when left unset.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::config::AppConfig;

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG` overrides.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only the command result and errors are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print only results and errors"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file read instead of the platform default.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Template directory loaded on top of the built-ins. Replaces
    /// `templates.dir` from config and must exist.
    #[arg(
        short = 'd',
        long = "dir",
        global = true,
        value_name = "DIR",
        help = "Template directory"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Walk template directories recursively; also set by
    /// `templates.recursive`.
    #[arg(
        short = 'r',
        long = "recursive",
        global = true,
        help = "Scan template subdirectories"
    )]
    pub recursive: bool,

    /// `auto` defers to `output.format` in config, then to the terminal.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Result format"
    )]
    pub output_format: OutputFormat,
}

/// Where named templates come from for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource<'a> {
    pub dir: Option<&'a Path>,
    /// `true` when the directory came from `--dir`, so a missing one is an
    /// error rather than a warning.
    pub explicit: bool,
    pub recursive: bool,
}

impl GlobalArgs {
    /// `--dir` / `--recursive`, falling back to the `[templates]` section.
    pub fn template_source<'a>(&'a self, config: &'a AppConfig) -> TemplateSource<'a> {
        let (dir, explicit) = match &self.templates_dir {
            Some(dir) => (Some(dir.as_path()), true),
            None => (config.templates.dir.as_deref(), false),
        };

        TemplateSource {
            dir,
            explicit,
            recursive: self.recursive || config.templates.recursive,
        }
    }

    /// `--output-format`, or `output.format` from config when the flag is
    /// `auto`. May still be `Auto`; terminal detection happens later.
    pub fn requested_format(&self, config: &AppConfig) -> OutputFormat {
        match self.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        }
    }
}

/// How command results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Coloured status lines around the result.
    Human,
    /// Result text only, no colour.
    Plain,
    /// One JSON document on stdout.
    Json,
}

impl OutputFormat {
    /// Parse `output.format`; anything unrecognised counts as `auto`.
    pub fn from_config(raw: &str) -> Self {
        <Self as ValueEnum>::from_str(raw, true).unwrap_or_else(|_| {
            tracing::warn!(format = raw, "Unknown output.format in config, using auto");
            Self::Auto
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.templates.dir = Some(PathBuf::from("from-config"));
        let args = GlobalArgs {
            templates_dir: Some(PathBuf::from("from-flag")),
            ..Default::default()
        };

        let source = args.template_source(&config);

        assert_eq!(source.dir, Some(Path::new("from-flag")));
        assert!(source.explicit);
    }

    #[test]
    fn config_dir_is_not_explicit() {
        let mut config = AppConfig::default();
        config.templates.dir = Some(PathBuf::from("prompts"));
        config.templates.recursive = true;

        let args = GlobalArgs::default();
        let source = args.template_source(&config);

        assert_eq!(source.dir, Some(Path::new("prompts")));
        assert!(!source.explicit);
        assert!(source.recursive);
    }

    #[test]
    fn no_dir_anywhere() {
        let args = GlobalArgs::default();
        let config = AppConfig::default();
        let source = args.template_source(&config);
        assert_eq!(
            source,
            TemplateSource {
                dir: None,
                explicit: false,
                recursive: false
            }
        );
    }

    #[test]
    fn explicit_format_wins_over_config() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            output_format: OutputFormat::Plain,
            ..Default::default()
        };
        assert_eq!(args.requested_format(&config), OutputFormat::Plain);
    }

    #[test]
    fn config_format_used_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "JSON".into();
        assert_eq!(
            GlobalArgs::default().requested_format(&config),
            OutputFormat::Json
        );
    }

    #[test]
    fn unknown_config_format_is_auto() {
        assert_eq!(OutputFormat::from_config("fancy"), OutputFormat::Auto);
        assert_eq!(OutputFormat::from_config("plain"), OutputFormat::Plain);
    }
}
