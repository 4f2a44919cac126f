use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "forge",
    about = "Scaffold new projects from Maven archetypes and file templates",
    version
)]
pub struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit debug logs on stderr (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    New(NewArgs),

    /// List available templates
    #[command(alias = "list")]
    Templates {
        /// Show stack, parameters and modules for each template
        #[arg(short, long)]
        long: bool,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Template to use (default: the configured default template)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project name, also the name of the generated directory
    #[arg(short, long)]
    pub artifact_id: Option<String>,

    /// Maven groupId (archetype templates)
    #[arg(short, long)]
    pub group_id: Option<String>,

    /// Project version (default: 1.0.0-SNAPSHOT for archetypes, 0.1.0 otherwise)
    #[arg(short = 'v', long = "version")]
    pub project_version: Option<String>,

    /// Base package (archetype templates; defaults to the group id)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Module path (file templates; defaults to the artifact id)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Directory the project directory is created in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Always run the interactive wizard
    #[arg(long)]
    pub interactive: bool,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
