mod cli;
mod handlers;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use handlers::{run, version};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let status = run::handle_run(args)?;
            if status != 0 {
                std::process::exit(status);
            }
            Ok(())
        }
        Commands::CheckVersion { major, minor } => version::handle_check_version(major, minor),
        Commands::Version => version::handle_version(),
    }
}
