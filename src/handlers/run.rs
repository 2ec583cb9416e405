use anyhow::Result;
use std::env;
use crate::cli::RunArgs;
use runcmd::config::{find_config, load_config, parse_env_pair, resolve_env};
use runcmd::{FailureMode, RunOptions, run_cmd, run_cmd_no_fail};

/// Returns the exit status the process should end with.
pub fn handle_run(args: RunArgs) -> Result<i32> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => find_config(&env::current_dir()?)?,
    };

    let overrides = args
        .env
        .iter()
        .map(|raw| parse_env_pair(raw))
        .collect::<Result<Vec<_>>>()?;
    let env = resolve_env(&config, args.env_file.as_deref(), &overrides)?;

    let cmd = args.cmd.join(" ");
    let failure = if args.raise { FailureMode::Raise } else { FailureMode::Exit };

    let mut options = RunOptions::new()
        .verbose(args.verbose || config.run.verbose.unwrap_or(false))
        .dry_run(args.dry_run)
        .combine_output(args.combine || config.run.combine_output.unwrap_or(false))
        .failure(failure);
    options.input = args.input;
    options.from_dir = args.dir;
    options.env = env;
    options.shell = args.shell.or(config.run.shell);

    if args.no_fail {
        let out = run_cmd_no_fail(&cmd, &options)?;
        if !out.is_empty() {
            println!("{}", out);
        }
        return Ok(0);
    }

    let out = run_cmd(&cmd, &options)?;
    if let Some(stdout) = out.stdout.as_deref().filter(|s| !s.is_empty()) {
        println!("{}", stdout);
    }
    if let Some(stderr) = out.stderr.as_deref().filter(|s| !s.is_empty()) {
        eprintln!("{}", stderr);
    }
    Ok(out.status)
}
