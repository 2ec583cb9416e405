use anyhow::{Context, Result, bail};
use colored::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "runcmd.toml";

#[derive(Debug, Deserialize, Default)]
pub struct RuncmdConfig {
    #[serde(default)]
    pub run: RunSection,
    pub env: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RunSection {
    pub shell: Option<String>,
    pub verbose: Option<bool>,
    pub combine_output: Option<bool>,
    pub env_file: Option<PathBuf>,
}

/// Loads an explicit config file. Relative `env_file` paths resolve against
/// the file's directory.
pub fn load_config(path: &Path) -> Result<RuncmdConfig> {
    if !path.exists() {
        bail!("Config file not found: {:?}", path);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config: RuncmdConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if let (Some(env_file), Some(base)) = (&mut config.run.env_file, path.parent()) {
        if env_file.is_relative() {
            *env_file = base.join(&*env_file);
        }
    }

    Ok(config)
}

/// `runcmd.toml` in `dir` if present, defaults otherwise.
pub fn find_config(dir: &Path) -> Result<RuncmdConfig> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        log::debug!("Using config: {}", path.display());
        load_config(&path)
    } else {
        Ok(RuncmdConfig::default())
    }
}

pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open env file: {}", path.display()))?;
    for item in iter {
        let (key, val) = item.with_context(|| format!("Failed to parse env file: {}", path.display()))?;
        vars.insert(key, val);
    }
    Ok(vars)
}

/// Layers `[env]`, the config's env file, `extra_file` and `overrides`, later
/// layers winning. `None` means no layer was given and the child inherits.
pub fn resolve_env(
    config: &RuncmdConfig,
    extra_file: Option<&Path>,
    overrides: &[(String, String)],
) -> Result<Option<HashMap<String, String>>> {
    let mut env: Option<HashMap<String, String>> = config.env.clone();

    let files = config.run.env_file.as_deref().into_iter().chain(extra_file);
    for file in files {
        eprintln!("{} Loading environment from: {}", "🌿".green(), file.display().to_string().bold());
        let vars = load_env_file(file)?;
        env.get_or_insert_with(HashMap::new).extend(vars);
    }

    if !overrides.is_empty() {
        env.get_or_insert_with(HashMap::new)
            .extend(overrides.iter().cloned());
    }

    Ok(env)
}

pub fn parse_env_pair(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_string(), val.to_string())),
        _ => bail!("Expected KEY=VALUE, got '{}'", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = find_config(dir.path()).unwrap();
        assert!(config.run.shell.is_none());
        assert!(config.env.is_none());
        assert!(resolve_env(&config, None, &[]).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[run]\nshell = \"bash -o pipefail\"\nverbose = true\nenv_file = \".env\"\n\n[env]\nA = \"toml\"\nB = \"toml\"\n",
        )
        .unwrap();
        fs::write(dir.path().join(".env"), "B=dotenv\nC=dotenv\n").unwrap();

        let config = find_config(dir.path()).unwrap();
        assert_eq!(config.run.shell.as_deref(), Some("bash -o pipefail"));
        assert_eq!(config.run.verbose, Some(true));
        assert_eq!(config.run.env_file, Some(dir.path().join(".env")));

        let overrides = vec![("C".to_string(), "cli".to_string())];
        let env = resolve_env(&config, None, &overrides).unwrap().unwrap();
        assert_eq!(env["A"], "toml");
        assert_eq!(env["B"], "dotenv");
        assert_eq!(env["C"], "cli");
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_bad_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[run\nshell = ").unwrap();
        assert!(find_config(dir.path()).is_err());
    }

    #[test]
    fn test_parse_env_pair() {
        assert_eq!(parse_env_pair("K=v=w").unwrap(), ("K".to_string(), "v=w".to_string()));
        assert_eq!(parse_env_pair("K=").unwrap(), ("K".to_string(), String::new()));
        assert!(parse_env_pair("=v").is_err());
        assert!(parse_env_pair("novalue").is_err());
    }
}
