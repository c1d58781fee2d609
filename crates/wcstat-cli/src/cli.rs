use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wcstat",
    about = "wcstat: normalize working-copy status reports",
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
    /// Print the file status records of an XML status report
    Status(StatusArgs),
    /// List moves whose other half is missing from the report
    Moves(MovesArgs),
}

#[derive(Args)]
pub struct StatusArgs {
    /// Report file (reads standard input when omitted)
    pub input: Option<PathBuf>,
    /// Only show records in this changelist
    #[arg(short, long)]
    pub changelist: Option<String>,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Report file (reads standard input when omitted)
    pub input: Option<PathBuf>,
    /// Exit with an error when any mismatch is found
    #[arg(long)]
    pub strict: bool,
}
