//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use headland::util::shell::ColorChoice;

/// Headland - dependency resolution for header-only binding libraries
#[derive(Parser)]
#[command(name = "headland")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dependency resolution step
    Resolve(ResolveArgs),

    /// Show compile/link flags for the import target
    Flags(FlagsArgs),

    /// Stage bundled headers into the distribution tree
    Stage(StageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Resolve against the host-installed copy
    #[arg(long, conflicts_with = "bundled")]
    pub system: bool,

    /// Resolve against the bundled in-tree copy
    #[arg(long)]
    pub bundled: bool,

    /// Emit the import target as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Show compile flags only
    #[arg(long)]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,

    /// Resolve against the host-installed copy
    #[arg(long, conflicts_with = "bundled")]
    pub system: bool,

    /// Resolve against the bundled in-tree copy
    #[arg(long)]
    pub bundled: bool,
}

#[derive(Args)]
pub struct StageArgs {
    /// Destination directory (defaults to the configured stage dest)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Show what would be staged without copying
    #[arg(long)]
    pub dry_run: bool,

    /// Recopy headers even if up to date
    #[arg(long)]
    pub force: bool,

    /// Stage for the host-installed copy (a no-op)
    #[arg(long, conflicts_with = "bundled")]
    pub system: bool,

    /// Stage the bundled in-tree copy
    #[arg(long)]
    pub bundled: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
