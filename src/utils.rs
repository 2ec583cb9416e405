use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Splits a shell setting such as `bash -o pipefail` into program and args.
/// Falls back to `sh` (or `cmd` on Windows) when nothing is configured.
pub fn detect_shell(config_shell: Option<&str>) -> Result<(String, Vec<String>)> {
    let shell = config_shell
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| if cfg!(windows) { "cmd".to_string() } else { "sh".to_string() });

    let mut words = shell_words::split(&shell)
        .with_context(|| format!("Failed to parse shell setting: {}", shell))?;
    if words.is_empty() {
        bail!("Shell setting is empty");
    }
    let program = words.remove(0);
    Ok((program, words))
}

// "cmd" or "cmd.exe" uses /C, everything else (sh, bash, zsh, pwsh) takes -c
pub fn shell_flag(program: &str) -> &'static str {
    if program.contains("cmd") && !program.contains("sh") {
        "/C"
    } else {
        "-c"
    }
}

/// Builds `<shell> [shell args] -c <cmd_str>`. The program is resolved against
/// the caller's PATH so a replacement environment without PATH still works.
pub fn shell_command(cmd_str: &str, config_shell: Option<&str>) -> Result<Command> {
    let (program, args) = detect_shell(config_shell)?;
    let resolved: PathBuf = which::which(&program)
        .with_context(|| format!("Shell not found: {}", program))?;

    let mut command = Command::new(resolved);
    command.args(&args).arg(shell_flag(&program)).arg(cmd_str);
    Ok(command)
}

pub fn current_dir_display() -> String {
    env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| ".".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_shell_default() {
        let (program, args) = detect_shell(None).unwrap();
        if cfg!(windows) {
            assert_eq!(program, "cmd");
        } else {
            assert_eq!(program, "sh");
        }
        assert!(args.is_empty());
    }

    #[test]
    fn test_detect_shell_with_args() {
        let (program, args) = detect_shell(Some("bash -o pipefail")).unwrap();
        assert_eq!(program, "bash");
        assert_eq!(args, vec!["-o".to_string(), "pipefail".to_string()]);
    }

    #[test]
    fn test_detect_shell_blank_falls_back() {
        let (program, _) = detect_shell(Some("   ")).unwrap();
        assert!(program == "sh" || program == "cmd");
    }

    #[test]
    fn test_shell_flag() {
        assert_eq!(shell_flag("cmd"), "/C");
        assert_eq!(shell_flag("cmd.exe"), "/C");
        assert_eq!(shell_flag("sh"), "-c");
        assert_eq!(shell_flag("/usr/bin/zsh"), "-c");
    }

    #[test]
    fn test_unknown_shell_errors() {
        assert!(shell_command("true", Some("definitely-not-a-shell-xyz")).is_err());
    }
}
