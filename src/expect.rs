use colored::*;
use thiserror::Error;

pub const ERROR_PREFIX: &str = "ERROR:";

/// How a failed expectation is reported back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Print the message to stderr and terminate the process with status 1.
    #[default]
    Exit,
    /// Hand the failure back as an `ExpectError`.
    Raise,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{prefix} {message}")]
pub struct ExpectError {
    prefix: String,
    message: String,
}

impl ExpectError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks user-facing preconditions. Not meant for internal invariants.
#[derive(Debug, Clone)]
pub struct Expectation {
    mode: FailureMode,
    prefix: String,
}

impl Default for Expectation {
    fn default() -> Self {
        Self {
            mode: FailureMode::default(),
            prefix: ERROR_PREFIX.to_string(),
        }
    }
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn check(&self, condition: bool, msg: impl AsRef<str>) -> Result<(), ExpectError> {
        if condition {
            return Ok(());
        }

        let err = ExpectError {
            prefix: self.prefix.clone(),
            message: msg.as_ref().to_string(),
        };

        match self.mode {
            FailureMode::Raise => Err(err),
            FailureMode::Exit => {
                log::debug!("Expectation failed, exiting: {}", err.message);
                eprintln!("{}", err.to_string().red());
                std::process::exit(1);
            }
        }
    }
}

/// Like `assert!` for user errors: prints `ERROR: <msg>` and exits on failure.
pub fn expect(condition: bool, msg: impl AsRef<str>) -> Result<(), ExpectError> {
    Expectation::new().check(condition, msg)
}

pub fn expect_with(condition: bool, msg: impl AsRef<str>, mode: FailureMode) -> Result<(), ExpectError> {
    Expectation::new().mode(mode).check(condition, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_passes_on_true() {
        assert!(expect(true, "error1").is_ok());
        assert!(expect_with(true, "error1", FailureMode::Raise).is_ok());
    }

    #[test]
    fn test_expect_raise_prefixes_message() {
        let err = expect_with(false, "error2", FailureMode::Raise).unwrap_err();
        assert_eq!(err.to_string(), "ERROR: error2");
        assert_eq!(err.message(), "error2");
    }

    #[test]
    fn test_custom_prefix() {
        let err = Expectation::new()
            .mode(FailureMode::Raise)
            .prefix("FATAL:")
            .check(false, "boom")
            .unwrap_err();
        assert_eq!(err.to_string(), "FATAL: boom");
    }

    #[test]
    fn test_default_mode_is_exit() {
        assert_eq!(FailureMode::default(), FailureMode::Exit);
    }
}
