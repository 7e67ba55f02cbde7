//! # CLI Argument Definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "forgehand")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Register and start a Forgejo Actions runner, or sync a git working tree")]
pub struct Cli {
    /// Deployment root holding `.env`, the compose file and `data/runner`
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Env file to load instead of `<dir>/.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostics to rolling log files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Write the log files as JSON lines
    #[arg(long, global = true, requires = "log_dir")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Register the runner with the Forgejo instance (one-time)
    Register {},
    /// Start the registered runner as a background compose service
    Start {},
    /// git add, commit with a timestamp, pull and push
    Push {},
}
