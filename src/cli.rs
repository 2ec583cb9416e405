use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runcmd", version, about = "Run shell commands with captured output")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a shell command line
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Fail unless the building rustc is at least MAJOR.MINOR
    CheckVersion { major: u32, minor: u32 },

    /// Print the rustc version this binary was built with
    Version,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Working directory for the command
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Text fed to the command's stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Print the command and directory before running
    #[arg(short, long)]
    pub verbose: bool,

    /// Report success without running anything
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Merge stderr into stdout
    #[arg(long = "combine")]
    pub combine: bool,

    /// Fail with an ERROR: message on non-zero exit
    #[arg(long = "no-fail")]
    pub no_fail: bool,

    /// With --no-fail, propagate the failure instead of exiting directly
    #[arg(long, requires = "no_fail")]
    pub raise: bool,

    /// Shell used to interpret the command (may include arguments)
    #[arg(long)]
    pub shell: Option<String>,

    /// KEY=VALUE; any env setting replaces the inherited environment
    #[arg(short, long = "env")]
    pub env: Vec<String>,

    /// Load variables from a dotenv file
    #[arg(long = "env-file")]
    pub env_file: Option<PathBuf>,

    /// Config file (defaults to ./runcmd.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(last = true, required = true)]
    pub cmd: Vec<String>,
}
