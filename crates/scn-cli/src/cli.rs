use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scn",
    about = "Scenario: build object graphs from declarative fixtures",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a scenario and print every object
    Build(BuildArgs),
    /// Build a scenario and print object counts only
    Check(BuildArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Specification document (.yaml, .yml or .json)
    pub file: PathBuf,
    /// Types to load first, in order
    #[arg(long, value_delimiter = ',')]
    pub priority: Vec<String>,
    /// TOML file with scenario settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}
