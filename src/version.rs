use anyhow::{Context, Result, bail};
use std::fmt;
use crate::expect::{ExpectError, FailureMode, expect_with};

// Set by build.rs from `$RUSTC --version`
const RUSTC_VERSION: &str = env!("RUNCMD_RUSTC_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Accepts `rustc 1.87.0 (17067e9ac 2025-05-09)` as well as a bare `1.87.0`.
    pub fn parse(raw: &str) -> Result<Self> {
        let token = raw
            .split_whitespace()
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .with_context(|| format!("No version number in: '{}'", raw))?;

        let mut parts = token.split('.').map(leading_number);
        let major = parts.next().flatten();
        let minor = parts.next().flatten();
        let patch = parts.next().flatten().unwrap_or(0);

        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self { major, minor, patch }),
            _ => bail!("Malformed version: '{}'", token),
        }
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// "0-nightly" -> 0
fn leading_number(part: &str) -> Option<u32> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Version of the rustc that built this crate, if it could be recorded.
pub fn toolchain_version() -> Option<Version> {
    Version::parse(RUSTC_VERSION).ok()
}

pub fn check_minimum_version(major: u32, minor: u32) -> Result<(), ExpectError> {
    check_minimum_version_with(major, minor, FailureMode::Exit)
}

pub fn check_minimum_version_with(major: u32, minor: u32, mode: FailureMode) -> Result<(), ExpectError> {
    check_against(toolchain_version(), major, minor, mode)
}

fn check_against(actual: Option<Version>, major: u32, minor: u32, mode: FailureMode) -> Result<(), ExpectError> {
    let have = actual
        .map(|v| format!("{}.{}", v.major, v.minor))
        .unwrap_or_else(|| "unknown".to_string());
    let msg = format!("Rust {}, minor version {} is required, you have {}", major, minor, have);
    expect_with(actual.is_some_and(|v| v.at_least(major, minor)), msg, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rustc_output() {
        let v = Version::parse("rustc 1.87.0 (17067e9ac 2025-05-09)").unwrap();
        assert_eq!(v, Version { major: 1, minor: 87, patch: 0 });
    }

    #[test]
    fn test_parse_nightly_and_bare() {
        let v = Version::parse("rustc 1.90.0-nightly (abc 2025-07-01)").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 90, 0));
        assert_eq!(Version::parse("2.3").unwrap().to_string(), "2.3.0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("rustc unknown").is_err());
        assert!(Version::parse("7").is_err());
    }

    #[test]
    fn test_toolchain_version_recorded() {
        let v = toolchain_version().unwrap();
        assert!(v.at_least(1, 87));
    }

    #[test]
    fn test_current_version_passes() {
        let v = toolchain_version().unwrap();
        assert!(check_minimum_version(v.major, v.minor).is_ok());
        assert!(check_minimum_version_with(v.major, v.minor, FailureMode::Raise).is_ok());
        assert!(check_minimum_version_with(0, 99, FailureMode::Raise).is_ok());
    }

    #[test]
    fn test_newer_required_fails() {
        let v = toolchain_version().unwrap();
        let err = check_minimum_version_with(v.major, v.minor + 1, FailureMode::Raise).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "ERROR: Rust {}, minor version {} is required, you have {}.{}",
                v.major,
                v.minor + 1,
                v.major,
                v.minor
            )
        );
        assert!(check_minimum_version_with(v.major + 1, 0, FailureMode::Raise).is_err());
    }

    #[test]
    fn test_unknown_version_fails() {
        let err = check_against(None, 1, 0, FailureMode::Raise).unwrap_err();
        assert!(err.message().ends_with("you have unknown"));
    }
}
