pub mod options;
pub mod output;

use anyhow::{Context, Result, anyhow};
use colored::*;
use log::{debug, info, trace};
use std::io::{self, PipeReader, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use crate::expect::expect_with;
use crate::utils::shell_command;
use self::options::{Redirect, RunOptions};
use self::output::{CmdOutput, decode_lossy, exit_code};

/// Runs `cmd` through a shell and waits for it.
///
/// A non-zero exit status is returned in the `CmdOutput`, never as an error.
/// Errors only cover failures to spawn, feed, or reap the child.
pub fn run_cmd(cmd: &str, options: &RunOptions) -> Result<CmdOutput> {
    if options.verbose {
        println!("{} {}\n{} {}", "RUN:".cyan(), cmd, "FROM:".cyan(), options.dir_display());
    }

    if options.dry_run {
        info!("[DRY-RUN] Skipping: {}", cmd);
        return Ok(CmdOutput::dry_run());
    }

    let mut command = shell_command(cmd, options.shell.as_deref())?;
    if let Some(dir) = &options.from_dir {
        command.current_dir(dir);
    }
    if let Some(env) = &options.env {
        command.env_clear();
        command.envs(env);
    }

    if options.input.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::inherit());
    }

    let merged = if options.combine_output {
        wire_combined(&mut command, options.stdout)?
    } else {
        command.stdout(stdio_for(options.stdout));
        command.stderr(stdio_for(options.stderr));
        None
    };

    debug!("Spawning: {} (dir: {})", cmd, options.dir_display());
    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn shell for command: {}", cmd))?;
    // The command still owns write ends of the merged pipe; EOF never arrives while it lives
    drop(command);

    let feeder = feed_stdin(&mut child, options.input.as_deref());

    let (status, stdout, stderr) = match merged {
        Some(mut reader) => {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .context("Failed to read combined output")?;
            let status = child.wait().context("Failed to wait for child process")?;
            (status, Some(buf), None)
        }
        None => {
            let output = child
                .wait_with_output()
                .context("Failed to wait for child process")?;
            let stdout = (!options.combine_output && options.stdout == Redirect::Capture)
                .then_some(output.stdout);
            let stderr = (!options.combine_output && options.stderr == Redirect::Capture)
                .then_some(output.stderr);
            (output.status, stdout, stderr)
        }
    };

    if let Some(handle) = feeder {
        join_feeder(handle)?;
    }

    let result = CmdOutput {
        status: exit_code(status),
        stdout: stdout.map(|b| decode_lossy(&b)),
        stderr: stderr.map(|b| decode_lossy(&b)),
    };

    debug!("Command exited with status {}: {}", result.status, cmd);
    trace!(
        "Captured {} stdout bytes, {} stderr bytes",
        result.stdout.as_ref().map_or(0, String::len),
        result.stderr.as_ref().map_or(0, String::len)
    );

    Ok(result)
}

/// Runs `cmd` and returns its stdout, failing through `options.failure` on a
/// non-zero exit. The failure text prefers stderr, then stdout.
pub fn run_cmd_no_fail(cmd: &str, options: &RunOptions) -> Result<String> {
    let output = run_cmd(cmd, options)?;

    if !output.success() {
        let msg = format!(
            "Command: '{}' failed with error '{}' from dir '{}'",
            cmd,
            output.error_text(),
            options.dir_display()
        );
        expect_with(false, msg, options.failure)?;
    }

    Ok(output.stdout.unwrap_or_default())
}

fn stdio_for(redirect: Redirect) -> Stdio {
    match redirect {
        Redirect::Capture => Stdio::piped(),
        Redirect::Inherit => Stdio::inherit(),
        Redirect::Discard => Stdio::null(),
    }
}

// stderr follows wherever stdout goes
fn wire_combined(command: &mut Command, target: Redirect) -> Result<Option<PipeReader>> {
    match target {
        Redirect::Capture => {
            let (reader, writer) = io::pipe().context("Failed to create output pipe")?;
            let err_writer = writer.try_clone().context("Failed to duplicate output pipe")?;
            command.stdout(writer);
            command.stderr(err_writer);
            Ok(Some(reader))
        }
        Redirect::Inherit => {
            command.stdout(Stdio::inherit());
            command.stderr(io::stdout());
            Ok(None)
        }
        Redirect::Discard => {
            command.stdout(Stdio::null());
            command.stderr(Stdio::null());
            Ok(None)
        }
    }
}

// Written from a thread so a chatty child can't deadlock us on full pipes
fn feed_stdin(child: &mut Child, input: Option<&str>) -> Option<JoinHandle<io::Result<()>>> {
    let input = input?.as_bytes().to_vec();
    let mut child_in = child.stdin.take()?;

    Some(thread::spawn(move || {
        let written = child_in.write_all(&input);
        drop(child_in);
        match written {
            // Child exited without reading everything
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }))
}

fn join_feeder(handle: JoinHandle<io::Result<()>>) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow!("stdin writer thread panicked"))?
        .context("Failed to write input to child process")
}
