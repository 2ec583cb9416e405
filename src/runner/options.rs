use std::collections::HashMap;
use std::path::PathBuf;
use crate::expect::FailureMode;

/// Where one of the child's output streams goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Redirect {
    #[default]
    Capture,
    Inherit,
    Discard,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<String>,
    pub from_dir: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
    /// Replaces the inherited environment when set; never merged with it.
    pub env: Option<HashMap<String, String>>,
    pub combine_output: bool,
    pub stdout: Redirect,
    pub stderr: Redirect,
    pub shell: Option<String>,
    /// Only consulted by `run_cmd_no_fail`.
    pub failure: FailureMode,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn from_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.from_dir = Some(dir.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn combine_output(mut self, combine: bool) -> Self {
        self.combine_output = combine;
        self
    }

    pub fn stdout(mut self, redirect: Redirect) -> Self {
        self.stdout = redirect;
        self
    }

    pub fn stderr(mut self, redirect: Redirect) -> Self {
        self.stderr = redirect;
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn failure(mut self, mode: FailureMode) -> Self {
        self.failure = mode;
        self
    }

    // Directory shown in traces and failure messages
    pub(crate) fn dir_display(&self) -> String {
        match &self.from_dir {
            Some(dir) => dir.display().to_string(),
            None => crate::utils::current_dir_display(),
        }
    }
}
