//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat, TemplateSource};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "promptkit",
    bin_name = "promptkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render, validate and chain prompt templates",
    long_about = "promptkit renders Jinja-style prompt templates with required-variable \
                  checks, chains templates so each output feeds the next, and validates \
                  template files.",
    after_help = "EXAMPLES:\n\
        \x20 promptkit render zero_shot_qa --var question='What is Rust?'\n\
        \x20 promptkit render ./prompts/qa.yaml --vars-file vars.json\n\
        \x20 promptkit chain extract summarize --dir ./prompts --var text='...'\n\
        \x20 promptkit list --format json\n\
        \x20 promptkit validate ./prompts",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render one template.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 promptkit render role_expert --var expertise='software engineer' \\\n\
            \x20     --var years=10 --var question='What is code review?'\n\
            \x20 promptkit render ./qa.yaml --vars-file vars.yaml"
    )]
    Render(RenderArgs),

    /// Render templates in sequence, feeding each output to the next.
    #[command(
        about = "Run a prompt chain",
        after_help = "EXAMPLES:\n\
            \x20 promptkit chain extract.yaml summarize.yaml --var text='...'\n\
            \x20 promptkit chain a b --output-key previous --history"
    )]
    Chain(ChainArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 promptkit list\n\
            \x20 promptkit list --dir ./prompts --format csv"
    )]
    List(ListArgs),

    /// Validate template files.
    #[command(
        about = "Validate template files",
        after_help = "EXAMPLES:\n\
            \x20 promptkit validate ./prompts/qa.yaml\n\
            \x20 promptkit validate ./prompts --recursive"
    )]
    Validate(ValidateArgs),

    /// Initialise a promptkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 promptkit init\n\
            \x20 promptkit --config ./promptkit.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 promptkit completions bash > ~/.local/share/bash-completion/completions/promptkit\n\
            \x20 promptkit completions zsh  > ~/.zfunc/_promptkit\n\
            \x20 promptkit completions fish > ~/.config/fish/completions/promptkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the promptkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 promptkit config get chain.output_key\n\
            \x20 promptkit config list\n\
            \x20 promptkit config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Variable inputs shared by `render` and `chain`.
#[derive(Debug, Args, Default)]
pub struct VarArgs {
    /// `KEY=VALUE` pairs. Values are read as JSON when they parse
    /// (`3`, `true`, `["a"]`) and as plain strings otherwise.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        help = "Set a variable (repeatable)"
    )]
    pub vars: Vec<String>,

    /// YAML or JSON file holding a mapping of variables. `--var` wins on
    /// conflicts.
    #[arg(
        long = "vars-file",
        value_name = "FILE",
        help = "Read variables from a YAML/JSON file"
    )]
    pub vars_file: Option<PathBuf>,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `promptkit render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template name, or path to a template file.
    #[arg(value_name = "TEMPLATE", help = "Template name or file path")]
    pub template: String,

    #[command(flatten)]
    pub vars: VarArgs,
}

// ── chain ─────────────────────────────────────────────────────────────────────

/// Arguments for `promptkit chain`.
#[derive(Debug, Args)]
pub struct ChainArgs {
    /// Templates to run, in order.
    #[arg(
        value_name = "TEMPLATE",
        required = true,
        num_args = 1..,
        help = "Template names or file paths, in execution order"
    )]
    pub templates: Vec<String>,

    #[command(flatten)]
    pub vars: VarArgs,

    /// Key each step's output is stored under; defaults to
    /// `chain.output_key` from config.
    #[arg(
        short = 'k',
        long = "output-key",
        value_name = "KEY",
        help = "Variable name that carries each step's output"
    )]
    pub output_key: Option<String>,

    /// Print every intermediate render.
    #[arg(long = "history", help = "Show each step's rendered output")]
    pub history: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `promptkit list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `promptkit validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// A template file or a directory of template files.
    /// Directories honour the global `--recursive` flag.
    #[arg(value_name = "PATH", help = "Template file or directory")]
    pub path: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `promptkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `promptkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `promptkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `chain.output_key`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
