//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    alt::AltCommands,
    app::AppCommands,
    cache::CacheCommands,
    cap::CapCommands,
    compat::CompatArgs,
    completions::CompletionsArgs,
    config::ConfigCommands,
    import::ImportArgs,
    init::InitArgs,
    link::LinkCommands,
    pin::PinCommands,
    prompt::PromptArgs,
    search::SearchArgs,
    status::StatusArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "osb")]
#[command(author, version, about = "opensource.builders toolkit")]
#[command(
    long_about = "A Unix-style toolkit for managing a directory of proprietary applications, their open-source alternatives, and shared capabilities as plain text files under git version control."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Catalog root (default: auto-detect by finding .osb/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new OSB catalog
    Init(InitArgs),

    /// Proprietary application management
    #[command(subcommand)]
    App(AppCommands),

    /// Open-source alternative management
    #[command(subcommand)]
    Alt(AltCommands),

    /// Capability management
    #[command(subcommand)]
    Cap(CapCommands),

    /// Manage links between catalog entries
    #[command(subcommand)]
    Link(LinkCommands),

    /// Compatibility report for a proprietary app's alternatives
    Compat(CompatArgs),

    /// Pin capabilities for the build prompt (the Build Drawer)
    #[command(subcommand)]
    Pin(PinCommands),

    /// Generate the AI build prompt from pinned capabilities
    Prompt(PromptArgs),

    /// Search across all entity types
    Search(SearchArgs),

    /// Show catalog status dashboard
    Status(StatusArgs),

    /// Validate catalog files and referential integrity
    Validate(ValidateArgs),

    /// Bulk-import catalog entries from CSV
    Import(ImportArgs),

    /// Entity cache management
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Show resolved configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
    /// Short ID aliases (APP@1), one per line
    ShortId,
    /// File paths, one per line
    Path,
}
