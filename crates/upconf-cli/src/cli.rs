//! Clap CLI definitions for the `upconf` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// upconf -- find and load application configuration files.
///
/// Walks up from a directory looking for an application's configuration
/// file (package.json property, .<name>rc, <name>.config.yaml, ...) and
/// prints what it finds.
#[derive(Parser, Debug)]
#[command(
    name = "upconf",
    about = "Find and load application configuration files",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search upward from a directory for an application's configuration.
    Search(SearchArgs),

    /// Load one configuration file.
    Load(LoadArgs),

    /// List the files a search would try in each directory.
    Places(PlacesArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),
}

/// Flags controlling property-path projection.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectionArgs {
    /// Property holding the configuration in package.json (default: the
    /// application name). Dots separate nested keys.
    #[arg(long, value_name = "PATH")]
    pub package_prop: Option<String>,

    /// Apply the package property to every file, not only package.json.
    #[arg(long)]
    pub apply_package_prop: bool,
}

/// Arguments for `upconf search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Application name.
    pub module: String,

    /// Directory to start from (default: current directory).
    pub dir: Option<PathBuf>,

    /// Highest directory to inspect (default: home directory).
    #[arg(long, value_name = "DIR")]
    pub stop_dir: Option<PathBuf>,

    /// File to try in each directory; repeat to give several in priority
    /// order. Replaces the default list.
    #[arg(long = "search-place", value_name = "FILE")]
    pub search_places: Vec<String>,

    #[command(flatten)]
    pub projection: ProjectionArgs,

    /// Accept files without configuration instead of searching further.
    #[arg(long)]
    pub include_empty: bool,

    /// Ignore meta-config files in the current directory.
    #[arg(long)]
    pub no_meta: bool,
}

/// Arguments for `upconf load`.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Application name.
    pub module: String,

    /// Configuration file to load.
    pub file: PathBuf,

    #[command(flatten)]
    pub projection: ProjectionArgs,
}

/// Arguments for `upconf places`.
#[derive(Args, Debug)]
pub struct PlacesArgs {
    /// Application name.
    pub module: String,

    /// Ignore meta-config files in the current directory.
    #[arg(long)]
    pub no_meta: bool,
}

/// Arguments for `upconf completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
